//! Office Open XML output.

pub mod xlsx;

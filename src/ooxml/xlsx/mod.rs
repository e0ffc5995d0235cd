//! Excel (.xlsx) output.

pub mod writer;

pub use writer::XlsxSink;

//! Types and utilities shared by the readers, writers and the converter.

// Submodule declarations
pub mod binary;
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};

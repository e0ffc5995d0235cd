//! Unified error type for the converter.
//!
//! Every layer (database readers, workbook writers, the type mapper) keeps its
//! own error enum; this module folds them into the handful of kinds that the
//! command line and progress reporting present to users.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};

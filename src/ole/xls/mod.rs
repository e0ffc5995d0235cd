//! Legacy Excel (.xls) workbook writer
//!
//! Workbooks are produced in the BIFF8 format used by Excel 97-2003 and
//! stored in an OLE2 compound document.

/// Error types for XLS generation
mod error;

/// BIFF8 workbook writer
pub mod writer;

pub use error::{XlsError, XlsResult};
pub use writer::{XlsSink, XlsWriter};

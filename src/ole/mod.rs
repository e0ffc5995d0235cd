/// Constants for OLE file format
pub mod consts;

/// Errors raised by the compound file writer
mod error;

/// Header of OLE objects embedded in database fields
pub mod object_header;

/// OLE2 compound document writer
pub mod writer;

/// Legacy Excel (.xls) workbook writer
///
/// Produces BIFF8 workbooks stored as the `Workbook` stream of an OLE2
/// compound document.
pub mod xls;

pub use error::OleError;
pub use object_header::OleObjectHeader;

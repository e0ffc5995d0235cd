//! Spreadsheet output for the converter.
//!
//! # Supported Formats
//!
//! - `.xls` - Microsoft Excel 97-2003 (BIFF8 in OLE2), built in memory
//! - `.xlsx` - Microsoft Excel 2007+ (Office Open XML), streamed row by row
//!
//! # Architecture
//!
//! Writers implement [`WorkbookSink`]. [`Workbook`] picks one at run time
//! from an [`OutputFormat`]; sheet names come from [`SheetNamer`] and column
//! widths from [`autosize::ColumnWidths`].

pub mod autosize;
pub mod date;
mod error;
pub mod format;
pub mod naming;
pub mod traits;
pub mod types;
mod workbook;

pub(crate) use format::BUILTIN_NUMBER_FORMATS;

pub use date::DateSystem;
pub use error::{Result, SheetError};
pub use format::{DEFAULT_DATE_FORMAT, NumberFormatTable};
pub use naming::SheetNamer;
pub use traits::WorkbookSink;
pub use types::{CellStyle, CellValue, OutputFormat, StyleId};
pub use workbook::Workbook;

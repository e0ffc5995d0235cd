//! XLS (BIFF8) workbook writer

/// BIFF8 record generation
pub(crate) mod biff;

/// Core XLS writer implementation
mod core;

/// Fonts, number formats and XF records
pub mod formatting;

/// `WorkbookSink` adapter
mod sink;

pub use core::{WORKBOOK_STREAM_NAME, XlsCellValue, XlsWriter};
pub use formatting::{ExtendedFormat, Font, FormattingManager};
pub use sink::XlsSink;

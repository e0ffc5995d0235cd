//! Streaming XLSX writer.

pub mod constants;
mod package;
pub mod sheet;
mod sink;
pub mod styles;
pub mod workbook;

pub use sheet::StreamingSheet;
pub use sink::XlsxSink;
pub use styles::StylesBuilder;

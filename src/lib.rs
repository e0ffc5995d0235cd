//! access2excel - convert Microsoft Access databases into Excel workbooks
//!
//! Every table of an Access database (.mdb, .accdb) becomes a sheet: a bold
//! header row with the column names, then one row per record.
//!
//! # Features
//!
//! - **XLS output**: BIFF8 workbooks inside an OLE2 compound file
//! - **XLSX output**: SpreadsheetML packages, streamed row by row
//! - **Readers**: an `mdbtools`-backed reader and an in-memory one
//! - **Type mapping**: numbers, text, dates, booleans and OLE object names
//!
//! # Example - Converting a database file
//!
//! ```no_run
//! use access2excel::convert::{ConsoleProgress, ConvertOptions, Converter};
//! use access2excel::sheet::OutputFormat;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ConvertOptions {
//!     format: OutputFormat::Xls,
//!     ..ConvertOptions::default()
//! };
//! Converter::new(options).run(
//!     Path::new("northwind.accdb"),
//!     Path::new("northwind.xls"),
//!     &mut ConsoleProgress,
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Writing a workbook directly
//!
//! ```
//! use access2excel::sheet::{CellStyle, CellValue, DateSystem, OutputFormat, Workbook, WorkbookSink};
//! use std::io::Cursor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workbook = Workbook::create(OutputFormat::Xls, DateSystem::default());
//! let bold = workbook.create_cell_style(&CellStyle::bold())?;
//! workbook.create_sheet("Totals")?;
//! workbook.create_row(0)?;
//! workbook.write_cell(0, CellValue::Text("Sum".into()), Some(bold))?;
//!
//! let mut out = Cursor::new(Vec::new());
//! workbook.write_to(&mut out)?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod convert;
pub mod database;
pub mod ole;
pub mod ooxml;
pub mod sheet;

pub use common::{Error, Result};
pub use convert::{ConvertOptions, Converter};
pub use sheet::{OutputFormat, Workbook};

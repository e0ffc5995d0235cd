//! Workbook dispatching over the XLS and XLSX writers.

use super::date::DateSystem;
use super::error::Result;
use super::traits::WorkbookSink;
use super::types::{CellStyle, CellValue, OutputFormat, StyleId};
use crate::ole::xls::XlsSink;
use crate::ooxml::xlsx::XlsxSink;
use std::io::{Seek, Write};

/// A workbook being written in either output format.
///
/// # Examples
///
/// ```rust
/// use access2excel::sheet::{CellValue, DateSystem, OutputFormat, Workbook, WorkbookSink};
/// use std::io::Cursor;
///
/// let mut workbook = Workbook::create(OutputFormat::Xlsx, DateSystem::default());
/// workbook.create_sheet("Numbers")?;
/// workbook.create_row(0)?;
/// workbook.write_cell(0, CellValue::Number(1.5), None)?;
///
/// let mut out = Cursor::new(Vec::new());
/// workbook.write_to(&mut out)?;
/// # Ok::<(), access2excel::sheet::SheetError>(())
/// ```
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum Workbook {
    Xls(XlsSink),
    Xlsx(XlsxSink),
}

impl Workbook {
    /// Create an empty workbook for `format`.
    pub fn create(format: OutputFormat, date_system: DateSystem) -> Self {
        match format {
            OutputFormat::Xls => Workbook::Xls(XlsSink::new(date_system)),
            OutputFormat::Xlsx => Workbook::Xlsx(XlsxSink::new(date_system)),
        }
    }
}

impl WorkbookSink for Workbook {
    fn format(&self) -> OutputFormat {
        match self {
            Workbook::Xls(sink) => sink.format(),
            Workbook::Xlsx(sink) => sink.format(),
        }
    }

    fn create_cell_style(&mut self, style: &CellStyle) -> Result<StyleId> {
        match self {
            Workbook::Xls(sink) => sink.create_cell_style(style),
            Workbook::Xlsx(sink) => sink.create_cell_style(style),
        }
    }

    fn create_sheet(&mut self, name: &str) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.create_sheet(name),
            Workbook::Xlsx(sink) => sink.create_sheet(name),
        }
    }

    fn create_row(&mut self, index: usize) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.create_row(index),
            Workbook::Xlsx(sink) => sink.create_row(index),
        }
    }

    fn write_cell(&mut self, col: usize, value: CellValue, style: Option<StyleId>) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.write_cell(col, value, style),
            Workbook::Xlsx(sink) => sink.write_cell(col, value, style),
        }
    }

    fn track_all_columns_for_auto_sizing(&mut self) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.track_all_columns_for_auto_sizing(),
            Workbook::Xlsx(sink) => sink.track_all_columns_for_auto_sizing(),
        }
    }

    fn auto_size_column(&mut self, col: usize) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.auto_size_column(col),
            Workbook::Xlsx(sink) => sink.auto_size_column(col),
        }
    }

    fn write_to<W: Write + Seek>(&mut self, out: &mut W) -> Result<()> {
        match self {
            Workbook::Xls(sink) => sink.write_to(out),
            Workbook::Xlsx(sink) => sink.write_to(out),
        }
    }
}

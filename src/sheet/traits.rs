//! Trait implemented by the spreadsheet writers.

use super::error::Result;
use super::types::{CellStyle, CellValue, OutputFormat, StyleId};
use std::io::{Seek, Write};

/// A workbook being written one sheet and one row at a time.
///
/// Sheets are created in order and rows within a sheet are created in
/// ascending order. Cells are written into the most recently created row.
pub trait WorkbookSink {
    /// Format this workbook is persisted as.
    fn format(&self) -> OutputFormat;

    /// Register a cell style and return its handle.
    ///
    /// Identical styles may share a handle.
    fn create_cell_style(&mut self, style: &CellStyle) -> Result<StyleId>;

    /// Start a new sheet. The name must already be valid and unique.
    fn create_sheet(&mut self, name: &str) -> Result<()>;

    /// Start row `index` (0-based) in the current sheet.
    fn create_row(&mut self, index: usize) -> Result<()>;

    /// Write a cell at `col` (0-based) of the current row.
    fn write_cell(&mut self, col: usize, value: CellValue, style: Option<StyleId>) -> Result<()>;

    /// Start measuring every column of the current sheet.
    ///
    /// Writers that keep every cell in memory measure unconditionally and
    /// treat this as a no-op.
    fn track_all_columns_for_auto_sizing(&mut self) -> Result<()>;

    /// Fit column `col` of the current sheet to its widest cell.
    fn auto_size_column(&mut self, col: usize) -> Result<()>;

    /// Persist the workbook.
    fn write_to<W: Write + Seek>(&mut self, out: &mut W) -> Result<()>;
}

//! XLS file writer implementation
//!
//! Generates BIFF8 records in memory and stores them as the `Workbook`
//! stream of an OLE2 compound document.
//!
//! # Example
//!
//! ```rust
//! use access2excel::ole::xls::XlsWriter;
//! use std::io::Cursor;
//!
//! let mut writer = XlsWriter::new();
//! let sheet = writer.add_worksheet("Sheet1")?;
//! writer.write_string(sheet, 0, 0, "Hello")?;
//! writer.write_number(sheet, 0, 1, 42.0)?;
//!
//! let mut out = Cursor::new(Vec::new());
//! writer.write_to(&mut out)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::super::error::{XlsError, XlsResult};
use super::formatting::FormattingManager;
use crate::ole::writer::OleWriter;
use crate::sheet::CellStyle;
use std::io::{Seek, Write};

mod stream;
mod worksheet;

use self::stream::{WorkbookParts, generate_workbook_stream};
use self::worksheet::{SharedStrings, StoredValue, WritableCell, WritableWorksheet};

/// Name of the compound file stream holding the BIFF8 records
pub const WORKBOOK_STREAM_NAME: &str = "Workbook";

/// Cell value type for writing
#[derive(Debug, Clone, PartialEq)]
pub enum XlsCellValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// XLS file writer
///
/// Worksheets and cells are addressed by index. Cells may be written in any
/// order and are emitted sorted by row, then column.
#[derive(Debug, Default)]
pub struct XlsWriter {
    worksheets: Vec<WritableWorksheet>,
    shared_strings: SharedStrings,
    use_1904_dates: bool,
    fmt: FormattingManager,
}

impl XlsWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new worksheet and return its index.
    ///
    /// Names must be 1-31 characters and unique ignoring case.
    pub fn add_worksheet(&mut self, name: &str) -> XlsResult<usize> {
        let len = name.encode_utf16().count();
        if len == 0 || len > 31 {
            return Err(XlsError::InvalidData(
                "Worksheet name must be 1-31 characters".to_string(),
            ));
        }
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name.to_lowercase() == name.to_lowercase())
        {
            return Err(XlsError::InvalidData(format!(
                "Worksheet '{}' already exists",
                name
            )));
        }

        self.worksheets.push(WritableWorksheet::new(name.to_string()));
        Ok(self.worksheets.len() - 1)
    }

    pub fn write_string(&mut self, sheet: usize, row: u32, col: u16, value: &str) -> XlsResult<()> {
        self.write_cell(sheet, row, col, XlsCellValue::String(value.to_string()), 0)
    }

    pub fn write_number(&mut self, sheet: usize, row: u32, col: u16, value: f64) -> XlsResult<()> {
        self.write_cell(sheet, row, col, XlsCellValue::Number(value), 0)
    }

    pub fn write_boolean(&mut self, sheet: usize, row: u32, col: u16, value: bool) -> XlsResult<()> {
        self.write_cell(sheet, row, col, XlsCellValue::Boolean(value), 0)
    }

    /// Register a cell style and return a format id for [`write_cell`].
    ///
    /// [`write_cell`]: XlsWriter::write_cell
    pub fn add_cell_style(&mut self, style: &CellStyle) -> u16 {
        self.fmt.register_cell_style(style)
    }

    /// Write a cell with a format id from [`add_cell_style`] (0 for none).
    ///
    /// [`add_cell_style`]: XlsWriter::add_cell_style
    pub fn write_cell(
        &mut self,
        sheet: usize,
        row: u32,
        col: u16,
        value: XlsCellValue,
        format_id: u16,
    ) -> XlsResult<()> {
        if !self.fmt.has_format(format_id) {
            return Err(XlsError::InvalidFormat(format_id));
        }
        if row > u32::from(u16::MAX) || col > 0x00FF {
            return Err(XlsError::InvalidData(format!(
                "Cell ({}, {}) is outside the BIFF8 grid",
                row, col
            )));
        }

        let worksheet = self
            .worksheets
            .get_mut(sheet)
            .ok_or(XlsError::WorksheetNotFound(sheet))?;

        let value = match value {
            XlsCellValue::String(s) => StoredValue::Sst(self.shared_strings.intern(&s)),
            XlsCellValue::Number(n) => StoredValue::Number(n),
            XlsCellValue::Boolean(b) => StoredValue::Boolean(b),
        };
        worksheet.add_cell(
            row,
            col,
            WritableCell {
                value,
                format_idx: format_id,
            },
        );
        Ok(())
    }

    /// Set a column width in 1/256 character units.
    pub fn set_column_width(&mut self, sheet: usize, col: u16, width: u16) -> XlsResult<()> {
        let worksheet = self
            .worksheets
            .get_mut(sheet)
            .ok_or(XlsError::WorksheetNotFound(sheet))?;
        worksheet.set_column_width(col, width);
        Ok(())
    }

    /// Use the 1904 date system instead of 1900
    pub fn set_1904_dates(&mut self, use_1904: bool) {
        self.use_1904_dates = use_1904;
    }

    pub fn worksheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Write the compound document.
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> XlsResult<()> {
        let workbook_stream = generate_workbook_stream(&WorkbookParts {
            use_1904_dates: self.use_1904_dates,
            fmt: &self.fmt,
            shared_strings: &self.shared_strings,
            worksheets: &self.worksheets,
        })?;

        let mut ole_writer = OleWriter::new();
        ole_writer.create_stream(WORKBOOK_STREAM_NAME, workbook_stream)?;
        ole_writer.write_to(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_worksheet() {
        let mut writer = XlsWriter::new();
        assert_eq!(writer.add_worksheet("Sheet1").unwrap(), 0);
        assert_eq!(writer.add_worksheet("Sheet2").unwrap(), 1);
        assert!(writer.add_worksheet("sheet1").is_err());
        assert!(writer.add_worksheet("").is_err());
        assert_eq!(writer.worksheet_count(), 2);
    }

    #[test]
    fn test_write_to_unknown_sheet() {
        let mut writer = XlsWriter::new();
        assert!(matches!(
            writer.write_number(3, 0, 0, 1.0),
            Err(XlsError::WorksheetNotFound(3))
        ));
    }

    #[test]
    fn test_unregistered_format_rejected() {
        let mut writer = XlsWriter::new();
        let sheet = writer.add_worksheet("S").unwrap();
        assert!(matches!(
            writer.write_cell(sheet, 0, 0, XlsCellValue::Boolean(true), 7),
            Err(XlsError::InvalidFormat(7))
        ));
    }

    #[test]
    fn test_grid_limits() {
        let mut writer = XlsWriter::new();
        let sheet = writer.add_worksheet("S").unwrap();
        assert!(writer.write_number(sheet, 65_535, 255, 1.0).is_ok());
        assert!(writer.write_number(sheet, 65_536, 0, 1.0).is_err());
        assert!(writer.write_number(sheet, 0, 256, 1.0).is_err());
    }

    #[test]
    fn test_stream_is_padded_and_sheet_offset_patched() {
        let mut writer = XlsWriter::new();
        let sheet = writer.add_worksheet("Data").unwrap();
        writer.write_string(sheet, 0, 0, "x").unwrap();

        let stream = generate_workbook_stream(&WorkbookParts {
            use_1904_dates: false,
            fmt: &writer.fmt,
            shared_strings: &writer.shared_strings,
            worksheets: &writer.worksheets,
        })
        .unwrap();
        assert_eq!(stream.len(), stream::MIN_WORKBOOK_STREAM_LEN);

        // Find the BOUNDSHEET record and follow its offset to a worksheet BOF
        let mut pos = 0;
        let mut sheet_bof = None;
        while pos + 4 <= stream.len() {
            let kind = u16::from_le_bytes([stream[pos], stream[pos + 1]]);
            let len = u16::from_le_bytes([stream[pos + 2], stream[pos + 3]]) as usize;
            if kind == 0x0085 {
                let p = &stream[pos + 4..pos + 8];
                sheet_bof = Some(u32::from_le_bytes([p[0], p[1], p[2], p[3]]) as usize);
                break;
            }
            pos += 4 + len;
        }
        let bof = sheet_bof.unwrap();
        assert_eq!(&stream[bof..bof + 2], &[0x09, 0x08]);
        assert_eq!(&stream[bof + 6..bof + 8], &[0x10, 0x00]);
    }
}

use super::core::{XlsCellValue, XlsWriter};
use crate::sheet::autosize::ColumnWidths;
use crate::sheet::date::{self, DateSystem, FALLBACK_DATE_LAYOUT};
use crate::sheet::naming::validate_sheet_name;
use crate::sheet::{CellStyle, CellValue, OutputFormat, Result, SheetError, StyleId, WorkbookSink};
use std::collections::HashSet;
use std::io::{Seek, Write};

const FORMAT: OutputFormat = OutputFormat::Xls;

/// In-memory `.xls` workbook
///
/// Every cell is kept until [`WorkbookSink::write_to`], so every column is
/// measured for auto-sizing.
#[derive(Debug)]
pub struct XlsSink {
    writer: XlsWriter,
    date_system: DateSystem,
    /// Indexed by `StyleId`: the style and its XLS format id
    styles: Vec<(CellStyle, u16)>,
    sheet_names: HashSet<String>,
    current_sheet: Option<usize>,
    current_row: Option<u32>,
    widths: ColumnWidths,
}

impl XlsSink {
    pub fn new(date_system: DateSystem) -> Self {
        let mut writer = XlsWriter::new();
        writer.set_1904_dates(date_system.is_1904());
        Self {
            writer,
            date_system,
            styles: Vec::new(),
            sheet_names: HashSet::new(),
            current_sheet: None,
            current_row: None,
            widths: ColumnWidths::new(),
        }
    }

    fn check_limit(what: &'static str, value: usize, limit: usize) -> Result<()> {
        if value >= limit {
            return Err(SheetError::LimitExceeded {
                format: FORMAT,
                what,
                value,
                limit,
            });
        }
        Ok(())
    }

    fn sheet(&self) -> Result<usize> {
        self.current_sheet.ok_or(SheetError::NoActiveSheet)
    }
}

impl WorkbookSink for XlsSink {
    fn format(&self) -> OutputFormat {
        FORMAT
    }

    fn create_cell_style(&mut self, style: &CellStyle) -> Result<StyleId> {
        let format_id = self.writer.add_cell_style(style);
        self.styles.push((style.clone(), format_id));
        Ok(StyleId(self.styles.len() - 1))
    }

    fn create_sheet(&mut self, name: &str) -> Result<()> {
        validate_sheet_name(name)?;
        if !self.sheet_names.insert(name.to_lowercase()) {
            return Err(SheetError::DuplicateSheet(name.to_string()));
        }
        self.current_sheet = Some(self.writer.add_worksheet(name)?);
        self.current_row = None;
        self.widths = ColumnWidths::new();
        Ok(())
    }

    fn create_row(&mut self, index: usize) -> Result<()> {
        self.sheet()?;
        Self::check_limit("Row", index, FORMAT.max_rows())?;
        self.current_row = Some(index as u32);
        Ok(())
    }

    fn write_cell(&mut self, col: usize, value: CellValue, style: Option<StyleId>) -> Result<()> {
        let sheet = self.sheet()?;
        let row = self.current_row.ok_or(SheetError::NoActiveRow)?;
        Self::check_limit("Column", col, FORMAT.max_columns())?;
        let value = value.into_storable();

        let (cell_style, format_id) = match style {
            Some(id) => {
                let (cell_style, format_id) = self
                    .styles
                    .get(id.index())
                    .ok_or(SheetError::UnknownStyle(id.index()))?;
                (Some(cell_style), *format_id)
            },
            None => (None, 0),
        };

        let xls_value = match &value {
            CellValue::Bool(b) => XlsCellValue::Boolean(*b),
            CellValue::Number(n) => XlsCellValue::Number(*n),
            CellValue::Text(text) => {
                let len = text.chars().count();
                if len > FORMAT.max_text_len() {
                    return Err(SheetError::LimitExceeded {
                        format: FORMAT,
                        what: "Text length",
                        value: len,
                        limit: FORMAT.max_text_len(),
                    });
                }
                XlsCellValue::String(text.clone())
            },
            CellValue::Date(dt) => match date::excel_serial(*dt, self.date_system) {
                Some(serial) => XlsCellValue::Number(serial),
                None => XlsCellValue::String(dt.format(FALLBACK_DATE_LAYOUT).to_string()),
            },
        };

        self.widths.observe(
            col,
            &value,
            cell_style.is_some_and(|s| s.bold),
            cell_style.and_then(|s| s.number_format.as_deref()),
        );
        self.writer
            .write_cell(sheet, row, col as u16, xls_value, format_id)?;
        Ok(())
    }

    fn track_all_columns_for_auto_sizing(&mut self) -> Result<()> {
        self.widths.track_all();
        Ok(())
    }

    fn auto_size_column(&mut self, col: usize) -> Result<()> {
        let sheet = self.sheet()?;
        Self::check_limit("Column", col, FORMAT.max_columns())?;
        if let Some(width) = self.widths.apply(col) {
            self.writer.set_column_width(sheet, col as u16, width)?;
        }
        Ok(())
    }

    fn write_to<W: Write + Seek>(&mut self, out: &mut W) -> Result<()> {
        if self.writer.worksheet_count() == 0 {
            self.create_sheet("Sheet1")?;
        }
        self.writer.write_to(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sink_with_row() -> XlsSink {
        let mut sink = XlsSink::new(DateSystem::Windows1900);
        sink.create_sheet("Data").unwrap();
        sink.create_row(0).unwrap();
        sink
    }

    #[test]
    fn test_cells_need_sheet_and_row() {
        let mut sink = XlsSink::new(DateSystem::default());
        assert!(matches!(sink.create_row(0), Err(SheetError::NoActiveSheet)));
        sink.create_sheet("S").unwrap();
        assert!(matches!(
            sink.write_cell(0, CellValue::Bool(true), None),
            Err(SheetError::NoActiveRow)
        ));
    }

    #[test]
    fn test_limits() {
        let mut sink = sink_with_row();
        assert!(matches!(
            sink.create_row(65_536),
            Err(SheetError::LimitExceeded { what: "Row", limit: 65_536, .. })
        ));
        assert!(matches!(
            sink.write_cell(256, CellValue::Number(1.0), None),
            Err(SheetError::LimitExceeded { what: "Column", .. })
        ));
        assert!(matches!(
            sink.write_cell(0, CellValue::Text("t".repeat(32_768)), None),
            Err(SheetError::LimitExceeded { what: "Text length", .. })
        ));
        assert!(sink.write_cell(0, CellValue::Text("t".repeat(32_767)), None).is_ok());
    }

    #[test]
    fn test_duplicate_and_invalid_sheet_names() {
        let mut sink = sink_with_row();
        assert!(matches!(sink.create_sheet("DATA"), Err(SheetError::DuplicateSheet(_))));
        assert!(matches!(sink.create_sheet("a/b"), Err(SheetError::InvalidSheetName(_))));
    }

    #[test]
    fn test_unknown_style() {
        let mut sink = sink_with_row();
        assert!(matches!(
            sink.write_cell(0, CellValue::Bool(true), Some(StyleId(9))),
            Err(SheetError::UnknownStyle(9))
        ));
    }

    #[test]
    fn test_pre_epoch_date_is_written() {
        let mut sink = sink_with_row();
        let style = sink.create_cell_style(&CellStyle::with_number_format("m/d/yy h:mm")).unwrap();
        let old = NaiveDate::from_ymd_opt(1850, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        sink.write_cell(0, CellValue::Date(old), Some(style)).unwrap();
        sink.auto_size_column(0).unwrap();

        let mut out = std::io::Cursor::new(Vec::new());
        sink.write_to(&mut out).unwrap();
        assert!(out.get_ref().len() > 4096);
    }
}

use super::package::write_package;
use super::sheet::StreamingSheet;
use super::styles::StylesBuilder;
use crate::sheet::date::DateSystem;
use crate::sheet::naming::validate_sheet_name;
use crate::sheet::{CellStyle, CellValue, OutputFormat, Result, SheetError, StyleId, WorkbookSink};
use std::collections::HashSet;
use std::io::{Seek, Write};

const FORMAT: OutputFormat = OutputFormat::Xlsx;

/// Streaming `.xlsx` workbook
///
/// Rows are spilled to temp files as they complete. Every cell is measured
/// as it streams, but a column can only be auto-sized once tracking has been
/// switched on.
#[derive(Debug)]
pub struct XlsxSink {
    date_system: DateSystem,
    styles: StylesBuilder,
    /// Indexed by `StyleId`: the style and its cellXfs index
    registered: Vec<(CellStyle, usize)>,
    sheet_names: HashSet<String>,
    sheets: Vec<StreamingSheet>,
}

impl XlsxSink {
    pub fn new(date_system: DateSystem) -> Self {
        Self {
            date_system,
            styles: StylesBuilder::new(),
            registered: Vec::new(),
            sheet_names: HashSet::new(),
            sheets: Vec::new(),
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

    fn sheet(&mut self) -> Result<&mut StreamingSheet> {
        self.sheets.last_mut().ok_or(SheetError::NoActiveSheet)
    }
}

impl WorkbookSink for XlsxSink {
    fn format(&self) -> OutputFormat {
        FORMAT
    }

    fn create_cell_style(&mut self, style: &CellStyle) -> Result<StyleId> {
        let xf = self.styles.add_cell_style(style);
        self.registered.push((style.clone(), xf));
        Ok(StyleId(self.registered.len() - 1))
    }

    fn create_sheet(&mut self, name: &str) -> Result<()> {
        validate_sheet_name(name)?;
        if !self.sheet_names.insert(name.to_lowercase()) {
            return Err(SheetError::DuplicateSheet(name.to_string()));
        }
        let sheet = StreamingSheet::new(name, self.date_system)?;
        self.sheets.push(sheet);
        Ok(())
    }

    fn create_row(&mut self, index: usize) -> Result<()> {
        let sheet = self.sheet()?;
        Self::check_limit("Row", index, FORMAT.max_rows())?;
        sheet.start_row(index)
    }

    fn write_cell(&mut self, col: usize, value: CellValue, style: Option<StyleId>) -> Result<()> {
        Self::check_limit("Column", col, FORMAT.max_columns())?;
        let value = value.into_storable();
        if let CellValue::Text(text) = &value {
            let len = text.chars().count();
            if len > FORMAT.max_text_len() {
                return Err(SheetError::LimitExceeded {
                    format: FORMAT,
                    what: "Text length",
                    value: len,
                    limit: FORMAT.max_text_len(),
                });
            }
        }

        let (bold, number_format, xf) = match style {
            Some(id) => {
                let (cell_style, xf) = self
                    .registered
                    .get(id.index())
                    .ok_or(SheetError::UnknownStyle(id.index()))?;
                (cell_style.bold, cell_style.number_format.as_deref(), Some(*xf))
            },
            None => (false, None, None),
        };

        let sheet = self.sheets.last_mut().ok_or(SheetError::NoActiveSheet)?;
        sheet.write_cell(col, &value, xf)?;
        sheet.widths.observe(col, &value, bold, number_format);
        Ok(())
    }

    fn track_all_columns_for_auto_sizing(&mut self) -> Result<()> {
        self.sheet()?.widths.track_all();
        Ok(())
    }

    fn auto_size_column(&mut self, col: usize) -> Result<()> {
        Self::check_limit("Column", col, FORMAT.max_columns())?;
        let sheet = self.sheet()?;
        if !sheet.widths.is_tracking() {
            return Err(SheetError::ColumnNotTracked(col));
        }
        sheet.widths.apply(col);
        Ok(())
    }

    fn write_to<W: Write + Seek>(&mut self, out: &mut W) -> Result<()> {
        if self.sheets.is_empty() {
            self.create_sheet("Sheet1")?;
        }
        write_package(out, &mut self.sheets, &self.styles, self.date_system.is_1904())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn finish(sink: &mut XlsxSink) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        sink.write_to(&mut out).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_empty_workbook_gets_sheet1() {
        let mut sink = XlsxSink::new(DateSystem::Windows1900);
        let bytes = finish(&mut sink);
        assert!(part(&bytes, "xl/workbook.xml").contains(r#"<sheet name="Sheet1""#));
        assert!(part(&bytes, "xl/worksheets/sheet1.xml").contains("<sheetData></sheetData>"));
    }

    #[test]
    fn test_untracked_column_cannot_be_sized() {
        let mut sink = XlsxSink::new(DateSystem::Windows1900);
        sink.create_sheet("S").unwrap();
        assert!(matches!(sink.auto_size_column(0), Err(SheetError::ColumnNotTracked(0))));
        sink.track_all_columns_for_auto_sizing().unwrap();
        assert!(sink.auto_size_column(0).is_ok());
    }

    #[test]
    fn test_limits_and_errors() {
        let mut sink = XlsxSink::new(DateSystem::Windows1900);
        assert!(matches!(sink.create_row(0), Err(SheetError::NoActiveSheet)));
        sink.create_sheet("S").unwrap();
        assert!(matches!(
            sink.write_cell(0, CellValue::Bool(true), None),
            Err(SheetError::NoActiveRow)
        ));
        assert!(matches!(
            sink.create_row(1_048_576),
            Err(SheetError::LimitExceeded { what: "Row", .. })
        ));
        sink.create_row(5).unwrap();
        assert!(matches!(sink.create_row(4), Err(SheetError::RowOutOfOrder { row: 4, last: 5 })));
        assert!(matches!(
            sink.write_cell(16_384, CellValue::Bool(true), None),
            Err(SheetError::LimitExceeded { what: "Column", .. })
        ));
        assert!(matches!(
            sink.write_cell(0, CellValue::Bool(true), Some(StyleId(3))),
            Err(SheetError::UnknownStyle(3))
        ));
        assert!(matches!(sink.create_sheet("s"), Err(SheetError::DuplicateSheet(_))));
    }

    #[test]
    fn test_cells_written_before_tracking_are_measured() {
        let mut sink = XlsxSink::new(DateSystem::Windows1900);
        sink.create_sheet("S").unwrap();
        sink.create_row(0).unwrap();
        sink.write_cell(1, CellValue::Text("twelve chars".into()), None).unwrap();
        sink.track_all_columns_for_auto_sizing().unwrap();
        sink.auto_size_column(1).unwrap();

        let sheet = part(&finish(&mut sink), "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<col min="2" max="2" width="13" customWidth="1"/>"#));
    }

    #[test]
    fn test_package_contents() {
        let mut sink = XlsxSink::new(DateSystem::Mac1904);
        let bold = sink.create_cell_style(&CellStyle::bold()).unwrap();
        sink.create_sheet("First").unwrap();
        sink.track_all_columns_for_auto_sizing().unwrap();
        sink.create_row(0).unwrap();
        sink.write_cell(0, CellValue::Text("Header".into()), Some(bold)).unwrap();
        sink.create_row(1).unwrap();
        sink.write_cell(0, CellValue::Number(f64::INFINITY), None).unwrap();
        sink.auto_size_column(0).unwrap();
        sink.create_sheet("Second").unwrap();

        let bytes = finish(&mut sink);
        assert!(part(&bytes, "[Content_Types].xml").contains("/xl/worksheets/sheet2.xml"));
        assert!(part(&bytes, "xl/workbook.xml").contains(r#"date1904="1""#));
        assert!(part(&bytes, "xl/styles.xml").contains(r#"applyFont="1""#));

        let first = part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(first.contains(r#"tabSelected="1""#));
        assert!(first.contains(r#"<c r="A1" s="1" t="inlineStr"><is><t>Header</t></is></c>"#));
        assert!(first.contains("<t>Infinity</t>"));
        assert!(first.contains(r#"<col min="1" max="1""#));

        let second = part(&bytes, "xl/worksheets/sheet2.xml");
        assert!(!second.contains("tabSelected"));
    }
}

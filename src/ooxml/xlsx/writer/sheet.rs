//! Streaming worksheet part.
//!
//! Rows go to an anonymous spill file as soon as the next row starts, so a
//! sheet of any length only keeps one row in memory. The part is assembled
//! when the package is written: header elements first, then the spilled
//! `<sheetData>` body.

use super::constants::{XML_DECLARATION, namespace};
use crate::common::xml::escape_xml_text;
use crate::sheet::autosize::ColumnWidths;
use crate::sheet::date::{self, DateSystem, FALLBACK_DATE_LAYOUT};
use crate::sheet::{CellValue, Result as SheetResult, SheetError};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};

/// Convert a 1-based column number to Excel column letters (1 -> "A", 27 -> "AA").
pub(crate) fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// A1-style reference for 0-based coordinates.
fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_to_letters(col as u32 + 1), row + 1)
}

/// Used range of a sheet, 0-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UsedRange {
    first_row: usize,
    last_row: usize,
    first_col: usize,
    last_col: usize,
}

impl UsedRange {
    fn include(range: Option<Self>, row: usize, col: usize) -> Self {
        match range {
            None => Self {
                first_row: row,
                last_row: row,
                first_col: col,
                last_col: col,
            },
            Some(r) => Self {
                first_row: r.first_row.min(row),
                last_row: r.last_row.max(row),
                first_col: r.first_col.min(col),
                last_col: r.last_col.max(col),
            },
        }
    }

    fn to_ref(self) -> String {
        let start = cell_ref(self.first_row, self.first_col);
        if self.first_row == self.last_row && self.first_col == self.last_col {
            start
        } else {
            format!("{}:{}", start, cell_ref(self.last_row, self.last_col))
        }
    }
}

/// One worksheet being streamed to disk
#[derive(Debug)]
pub struct StreamingSheet {
    name: String,
    date_system: DateSystem,
    spill: BufWriter<File>,
    /// Row being filled and its cells by column
    row: Option<usize>,
    cells: BTreeMap<usize, String>,
    used: Option<UsedRange>,
    /// Bytes appended to the spill file so far
    spilled: u64,
    pub(crate) widths: ColumnWidths,
}

impl StreamingSheet {
    pub fn new(name: &str, date_system: DateSystem) -> SheetResult<Self> {
        Ok(Self {
            name: name.to_string(),
            date_system,
            spill: BufWriter::new(tempfile::tempfile()?),
            row: None,
            cells: BTreeMap::new(),
            used: None,
            spilled: 0,
            widths: ColumnWidths::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Close the current row and start row `index`.
    pub fn start_row(&mut self, index: usize) -> SheetResult<()> {
        if let Some(last) = self.row.filter(|&last| index <= last) {
            return Err(SheetError::RowOutOfOrder { row: index, last });
        }
        self.flush_row()?;
        self.row = Some(index);
        Ok(())
    }

    /// Write a cell into the current row, replacing any earlier value in the same column.
    pub fn write_cell(&mut self, col: usize, value: &CellValue, xf: Option<usize>) -> SheetResult<()> {
        let row = self.row.ok_or(SheetError::NoActiveRow)?;
        let mut xml = String::with_capacity(48);
        let _ = write!(xml, r#"<c r="{}""#, cell_ref(row, col));
        if let Some(xf) = xf.filter(|&xf| xf != 0) {
            let _ = write!(xml, r#" s="{}""#, xf);
        }

        match value {
            CellValue::Bool(b) => {
                let _ = write!(xml, r#" t="b"><v>{}</v></c>"#, u8::from(*b));
            },
            CellValue::Number(n) => write_number(&mut xml, *n),
            CellValue::Text(text) => write_inline_string(&mut xml, text),
            CellValue::Date(dt) => match date::excel_serial(*dt, self.date_system) {
                Some(serial) => write_number(&mut xml, serial),
                None => write_inline_string(&mut xml, &dt.format(FALLBACK_DATE_LAYOUT).to_string()),
            },
        }

        self.cells.insert(col, xml);
        self.used = Some(UsedRange::include(self.used, row, col));
        Ok(())
    }

    /// Append the buffered row to the spill file.
    fn flush_row(&mut self) -> SheetResult<()> {
        let Some(row) = self.row else {
            return Ok(());
        };
        if self.cells.is_empty() {
            return Ok(());
        }
        let open = format!(r#"<row r="{}">"#, row + 1);
        self.spill.write_all(open.as_bytes())?;
        let mut written = open.len() + b"</row>".len();
        for cell in self.cells.values() {
            self.spill.write_all(cell.as_bytes())?;
            written += cell.len();
        }
        self.spill.write_all(b"</row>")?;
        self.spilled += written as u64;
        self.cells.clear();
        Ok(())
    }

    /// Size of the `<sheetData>` body spilled so far, excluding the open row.
    pub fn spilled_bytes(&self) -> u64 {
        self.spilled
    }

    /// Write the complete worksheet part to `out`.
    pub fn write_part<W: Write>(&mut self, out: &mut W, tab_selected: bool) -> SheetResult<()> {
        self.flush_row()?;
        self.spill.flush()?;

        let mut head = String::with_capacity(512);
        head.push_str(XML_DECLARATION);
        let _ = write!(
            head,
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            namespace::SML,
            namespace::OFFICE_RELATIONSHIPS
        );
        let dimension = self.used.map_or_else(|| "A1".to_string(), UsedRange::to_ref);
        let _ = write!(head, r#"<dimension ref="{}"/>"#, dimension);
        head.push_str("<sheetViews><sheetView");
        if tab_selected {
            head.push_str(r#" tabSelected="1""#);
        }
        head.push_str(r#" workbookViewId="0"/></sheetViews>"#);
        head.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

        let mut applied = self.widths.applied().peekable();
        if applied.peek().is_some() {
            head.push_str("<cols>");
            for (col, units) in applied {
                let _ = write!(
                    head,
                    r#"<col min="{n}" max="{n}" width="{w}" customWidth="1"/>"#,
                    n = col + 1,
                    w = f64::from(units) / 256.0
                );
            }
            head.push_str("</cols>");
        }
        head.push_str("<sheetData>");
        out.write_all(head.as_bytes())?;

        let spill = self.spill.get_mut();
        spill.seek(SeekFrom::Start(0))?;
        io::copy(spill, out)?;
        spill.seek(SeekFrom::End(0))?;

        out.write_all(b"</sheetData></worksheet>")?;
        Ok(())
    }
}

fn write_number(xml: &mut String, n: f64) {
    xml.push_str("><v>");
    if n.fract() == 0.0 && n.abs() < 1e15 {
        xml.push_str(itoa::Buffer::new().format(n as i64));
    } else {
        xml.push_str(ryu::Buffer::new().format(n));
    }
    xml.push_str("</v></c>");
}

fn write_inline_string(xml: &mut String, text: &str) {
    let preserve = text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains('\n');
    xml.push_str(r#" t="inlineStr"><is><t"#);
    if preserve {
        xml.push_str(r#" xml:space="preserve""#);
    }
    xml.push('>');
    xml.push_str(&escape_xml_text(text));
    xml.push_str("</t></is></c>");
}

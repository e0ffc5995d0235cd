//! Styles.xml generator for XLSX files.
//!
//! Fonts, fills and borders are fixed: font 0 is the default and font 1 its
//! bold variant; the two mandatory fills and one empty border follow. Only
//! number formats and cell formats grow as styles are registered.

use super::constants::{XML_DECLARATION, namespace};
use crate::common::xml::escape_xml;
use crate::sheet::{CellStyle, NumberFormatTable};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

const BOLD_FONT_ID: usize = 1;

/// Builder for the cellXfs table and custom numFmts.
#[derive(Debug)]
pub struct StylesBuilder {
    number_formats: NumberFormatTable,
    /// Cell formats: (font_id, num_fmt_id); entry 0 is the default
    cell_formats: Vec<(usize, u16)>,
    style_map: HashMap<CellStyle, usize>,
}

impl Default for StylesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesBuilder {
    pub fn new() -> Self {
        Self {
            number_formats: NumberFormatTable::new(),
            cell_formats: vec![(0, 0)],
            style_map: HashMap::new(),
        }
    }

    /// Add a cell style and return its `s` attribute value.
    ///
    /// If the style has already been added, returns the existing index.
    pub fn add_cell_style(&mut self, style: &CellStyle) -> usize {
        if let Some(&index) = self.style_map.get(style) {
            return index;
        }

        let font_id = if style.bold { BOLD_FONT_ID } else { 0 };
        let num_fmt_id = style
            .number_format
            .as_deref()
            .map(|pattern| self.number_formats.register(pattern))
            .unwrap_or(0);

        let index = self.cell_formats.len();
        self.cell_formats.push((font_id, num_fmt_id));
        self.style_map.insert(style.clone(), index);
        index
    }

    /// Generate styles.xml content.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);
        xml.push_str(XML_DECLARATION);
        // Writing into a String cannot fail
        let _ = write!(xml, r#"<styleSheet xmlns="{}">"#, namespace::SML);

        let custom = self.number_formats.custom();
        if !custom.is_empty() {
            let _ = write!(xml, r#"<numFmts count="{}">"#, custom.len());
            for (id, pattern) in custom {
                let _ = write!(
                    xml,
                    r#"<numFmt numFmtId="{}" formatCode="{}"/>"#,
                    id,
                    escape_xml(pattern)
                );
            }
            xml.push_str("</numFmts>");
        }

        xml.push_str(concat!(
            r#"<fonts count="2">"#,
            r#"<font><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#,
            r#"<font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#,
            "</fonts>",
            r#"<fills count="2">"#,
            r#"<fill><patternFill patternType="none"/></fill>"#,
            r#"<fill><patternFill patternType="gray125"/></fill>"#,
            "</fills>",
            r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
            r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
        ));

        let _ = write!(xml, r#"<cellXfs count="{}">"#, self.cell_formats.len());
        for &(font_id, num_fmt_id) in &self.cell_formats {
            let _ = write!(
                xml,
                r#"<xf numFmtId="{}" fontId="{}" fillId="0" borderId="0" xfId="0""#,
                num_fmt_id, font_id
            );
            if font_id != 0 {
                xml.push_str(r#" applyFont="1""#);
            }
            if num_fmt_id != 0 {
                xml.push_str(r#" applyNumberFormat="1""#);
            }
            xml.push_str("/>");
        }
        xml.push_str("</cellXfs>");

        xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
        xml.push_str("</styleSheet>");
        xml
    }
}

//! XLS cell formatting (FONT, FORMAT and XF records)
//!
//! # XF table layout
//!
//! | Index  | Contents                                   |
//! |--------|--------------------------------------------|
//! | 0..14  | style XFs                                  |
//! | 15     | default cell XF                            |
//! | 16..20 | built-in comma, currency and percent styles|
//! | 21..   | cell XFs registered through this manager   |

use super::super::XlsResult;
use super::biff;
use crate::sheet::{CellStyle, NumberFormatTable, BUILTIN_NUMBER_FORMATS};
use std::collections::HashMap;
use std::io::Write;

pub const FONT_WEIGHT_NORMAL: u16 = 400;
pub const FONT_WEIGHT_BOLD: u16 = 700;

pub const COLOR_AUTOMATIC: u16 = 0x7FFF;

/// Index of the bold font among the default fonts
pub const BOLD_FONT_INDEX: u16 = 1;

const STYLE_XF_COUNT: u16 = 15;
const DEFAULT_CELL_XF_INDEX: u16 = STYLE_XF_COUNT;
const BUILTIN_STYLE_FORMATS: [u16; 5] = [0x002B, 0x0029, 0x002C, 0x002A, 0x0009];
const FIRST_USER_XF_INDEX: u16 = DEFAULT_CELL_XF_INDEX + 1 + BUILTIN_STYLE_FORMATS.len() as u16;

/// XF used-attribute bits, set on cell XFs that override their parent
const USED_NUMBER_FORMAT: u8 = 0x04;
const USED_FONT: u8 = 0x08;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Height in twips
    pub height: u16,
    pub weight: u16,
    pub italic: bool,
    pub name: String,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            height: 200,
            weight: FONT_WEIGHT_NORMAL,
            italic: false,
            name: "Arial".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedFormat {
    pub font_index: u16,
    pub format_index: u16,
}

pub fn write_font<W: Write>(writer: &mut W, font: &Font) -> XlsResult<()> {
    let mut data = Vec::with_capacity(16 + font.name.len());
    data.extend_from_slice(&font.height.to_le_bytes());
    let flags: u16 = if font.italic { 0x0002 } else { 0 };
    data.extend_from_slice(&flags.to_le_bytes());
    data.extend_from_slice(&COLOR_AUTOMATIC.to_le_bytes());
    data.extend_from_slice(&font.weight.to_le_bytes());
    // escapement, underline, family, charset, reserved
    data.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    biff::push_short_unicode_string(&mut data, &font.name)?;
    biff::write_record(writer, 0x0031, &data)
}

pub fn write_xf<W: Write>(writer: &mut W, xf: &ExtendedFormat, is_style_xf: bool) -> XlsResult<()> {
    biff::write_record_header(writer, 0x00E0, 20)?;
    writer.write_all(&xf.font_index.to_le_bytes())?;
    writer.write_all(&xf.format_index.to_le_bytes())?;

    // Style XFs are locked with parent 0xFFF; cell XFs are locked children of
    // style XF 0.
    let xf_type: u16 = if is_style_xf { 0xFFF5 } else { 0x0001 };
    writer.write_all(&xf_type.to_le_bytes())?;

    // bottom aligned, general, no rotation, no indent
    writer.write_all(&[0x20, 0, 0])?;

    let mut used = 0u8;
    if !is_style_xf {
        if xf.format_index != 0 {
            used |= USED_NUMBER_FORMAT;
        }
        if xf.font_index != 0 {
            used |= USED_FONT;
        }
    }
    writer.write_all(&[used])?;

    // no borders; default palette pattern colors (64, 65)
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0u32.to_le_bytes())?;
    writer.write_all(&0x20C0u16.to_le_bytes())?;
    Ok(())
}

/// Fonts, number formats and cell XFs of a workbook
#[derive(Debug)]
pub struct FormattingManager {
    fonts: Vec<Font>,
    /// User cell XFs, the first of which is written at index 21
    formats: Vec<ExtendedFormat>,
    number_formats: NumberFormatTable,
    style_map: HashMap<CellStyle, u16>,
}

impl FormattingManager {
    pub fn new() -> Self {
        // Normal, bold, italic, bold italic. Readers skip font index 4, so
        // these four never need remapping.
        let fonts = vec![
            Font::default(),
            Font {
                weight: FONT_WEIGHT_BOLD,
                ..Font::default()
            },
            Font {
                italic: true,
                ..Font::default()
            },
            Font {
                weight: FONT_WEIGHT_BOLD,
                italic: true,
                ..Font::default()
            },
        ];

        Self {
            fonts,
            formats: Vec::new(),
            number_formats: NumberFormatTable::new(),
            style_map: HashMap::new(),
        }
    }

    /// Register a cell style and return its format id.
    ///
    /// Format id 0 is the default cell XF; equal styles share an id.
    pub fn register_cell_style(&mut self, style: &CellStyle) -> u16 {
        if let Some(&id) = self.style_map.get(style) {
            return id;
        }

        let xf = ExtendedFormat {
            font_index: if style.bold { BOLD_FONT_INDEX } else { 0 },
            format_index: style
                .number_format
                .as_deref()
                .map(|pattern| self.number_formats.register(pattern))
                .unwrap_or(0),
        };
        let id = if xf == ExtendedFormat::default() {
            0
        } else {
            self.formats.push(xf);
            self.formats.len() as u16
        };
        self.style_map.insert(style.clone(), id);
        id
    }

    pub fn has_format(&self, format_id: u16) -> bool {
        usize::from(format_id) <= self.formats.len()
    }

    /// XF index written into cell records for a format id.
    pub fn cell_xf_index_for(&self, format_id: u16) -> u16 {
        if format_id == 0 {
            DEFAULT_CELL_XF_INDEX
        } else {
            FIRST_USER_XF_INDEX + (format_id - 1)
        }
    }

    pub fn write_fonts<W: Write>(&self, writer: &mut W) -> XlsResult<()> {
        for font in &self.fonts {
            write_font(writer, font)?;
        }
        Ok(())
    }

    /// Write FORMAT records for built-ins 0..7 and every custom pattern.
    pub fn write_number_formats<W: Write>(&self, writer: &mut W) -> XlsResult<()> {
        for (index, pattern) in BUILTIN_NUMBER_FORMATS.iter().enumerate().take(8) {
            biff::write_format_record(writer, index as u16, pattern)?;
        }
        for (code, pattern) in self.number_formats.custom() {
            biff::write_format_record(writer, *code, pattern)?;
        }
        Ok(())
    }

    pub fn write_formats<W: Write>(&self, writer: &mut W) -> XlsResult<()> {
        for i in 0..STYLE_XF_COUNT {
            let font_index = match i {
                1 | 2 => 1,
                3 | 4 => 2,
                _ => 0,
            };
            let xf = ExtendedFormat {
                font_index,
                format_index: 0,
            };
            write_xf(writer, &xf, true)?;
        }

        write_xf(writer, &ExtendedFormat::default(), false)?;

        for format_index in BUILTIN_STYLE_FORMATS {
            let xf = ExtendedFormat {
                font_index: 0,
                format_index,
            };
            write_xf(writer, &xf, true)?;
        }

        for xf in &self.formats {
            write_xf(writer, xf, false)?;
        }
        Ok(())
    }
}

impl Default for FormattingManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_styles_share_format_id() {
        let mut mgr = FormattingManager::new();
        let bold = mgr.register_cell_style(&CellStyle::bold());
        let date = mgr.register_cell_style(&CellStyle::with_number_format("m/d/yy h:mm"));
        assert_eq!(bold, 1);
        assert_eq!(date, 2);
        assert_eq!(mgr.register_cell_style(&CellStyle::bold()), 1);
        assert_eq!(mgr.register_cell_style(&CellStyle::default()), 0);
    }

    #[test]
    fn test_cell_xf_indices() {
        let mut mgr = FormattingManager::new();
        let id = mgr.register_cell_style(&CellStyle::bold());
        assert_eq!(mgr.cell_xf_index_for(0), 15);
        assert_eq!(mgr.cell_xf_index_for(id), 21);
        assert!(mgr.has_format(id));
        assert!(!mgr.has_format(id + 1));
    }

    #[test]
    fn test_xf_table_size() {
        let mut mgr = FormattingManager::new();
        mgr.register_cell_style(&CellStyle::bold());
        let mut out = Vec::new();
        mgr.write_formats(&mut out).unwrap();
        // 21 fixed XFs plus one user XF, 24 bytes each
        assert_eq!(out.len(), 22 * 24);
    }

    #[test]
    fn test_custom_number_formats_written() {
        let mut mgr = FormattingManager::new();
        mgr.register_cell_style(&CellStyle::with_number_format("yyyy-mm-dd"));
        let mut out = Vec::new();
        mgr.write_number_formats(&mut out).unwrap();

        let mut pos = 0;
        let mut codes = Vec::new();
        while pos < out.len() {
            let len = u16::from_le_bytes([out[pos + 2], out[pos + 3]]) as usize;
            codes.push(u16::from_le_bytes([out[pos + 4], out[pos + 5]]));
            pos += 4 + len;
        }
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6, 7, 164]);
    }
}

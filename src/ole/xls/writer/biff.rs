//! BIFF8 record writers
//!
//! Each BIFF record consists of:
//! - Record type (2 bytes)
//! - Record length (2 bytes)
//! - Record data (at most 8224 bytes)
//!
//! Based on "[MS-XLS]: Excel Binary File Format (.xls) Structure".

use super::super::{XlsError, XlsResult};
use std::io::Write;

mod cells;
mod sst;
mod workbook;
mod worksheet;

pub use cells::{write_boolerr, write_labelsst, write_number};
pub use sst::write_sst;
pub use workbook::{
    BOUNDSHEET_POSITION_OFFSET, write_bof, write_boundsheet, write_builtin_styles,
    write_codepage, write_date1904, write_eof, write_format_record, write_usesel_fs,
    write_window1,
};
pub use worksheet::{write_colinfo, write_dimensions, write_window2, write_wsbool};

/// Largest record payload before a CONTINUE record is needed
pub(crate) const MAX_RECORD_DATA: usize = 8224;

pub(crate) const BOF_WORKBOOK_GLOBALS: u16 = 0x0005;
pub(crate) const BOF_WORKSHEET: u16 = 0x0010;

#[inline]
pub(crate) fn write_record_header<W: Write>(
    writer: &mut W,
    record_type: u16,
    data_len: u16,
) -> XlsResult<()> {
    writer.write_all(&record_type.to_le_bytes())?;
    writer.write_all(&data_len.to_le_bytes())?;
    Ok(())
}

/// Write a complete record whose payload is already assembled.
pub(crate) fn write_record<W: Write>(writer: &mut W, record_type: u16, data: &[u8]) -> XlsResult<()> {
    if data.len() > MAX_RECORD_DATA {
        return Err(XlsError::RecordTooLarge {
            record_type,
            len: data.len(),
        });
    }
    write_record_header(writer, record_type, data.len() as u16)?;
    writer.write_all(data)?;
    Ok(())
}

/// Whether `value` needs the uncompressed UTF-16LE string form.
///
/// Compressed strings store each character as its low byte, which only
/// round trips for Latin-1.
pub(crate) fn needs_utf16(value: &str) -> bool {
    value.chars().any(|c| c as u32 > 0xFF)
}

/// Append string characters after the option byte.
pub(crate) fn push_string_chars(buf: &mut Vec<u8>, value: &str, wide: bool) {
    if wide {
        for unit in value.encode_utf16() {
            buf.extend_from_slice(&unit.to_le_bytes());
        }
    } else {
        buf.extend(value.chars().map(|c| c as u8));
    }
}

/// Append an XLUnicodeString (16-bit character count).
pub(crate) fn push_unicode_string(buf: &mut Vec<u8>, value: &str) {
    let wide = needs_utf16(value);
    let cch = value.encode_utf16().count().min(u16::MAX as usize) as u16;
    buf.extend_from_slice(&cch.to_le_bytes());
    buf.push(u8::from(wide));
    push_string_chars(buf, value, wide);
}

/// Append a ShortXLUnicodeString (8-bit character count).
pub(crate) fn push_short_unicode_string(buf: &mut Vec<u8>, value: &str) -> XlsResult<()> {
    let wide = needs_utf16(value);
    let cch = u8::try_from(value.encode_utf16().count()).map_err(|_| {
        XlsError::InvalidData(format!("String '{}' is longer than 255 characters", value))
    })?;
    buf.push(cch);
    buf.push(u8::from(wide));
    push_string_chars(buf, value, wide);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_strings_stay_compressed() {
        let mut buf = Vec::new();
        push_unicode_string(&mut buf, "café");
        assert_eq!(buf, [4, 0, 0, b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_wide_strings_use_utf16() {
        let mut buf = Vec::new();
        push_short_unicode_string(&mut buf, "Ω").unwrap();
        assert_eq!(buf, [1, 1, 0xA9, 0x03]);
    }

    #[test]
    fn test_oversized_record_rejected() {
        let mut out = Vec::new();
        let payload = vec![0u8; MAX_RECORD_DATA + 1];
        assert!(matches!(
            write_record(&mut out, 0x00FC, &payload),
            Err(XlsError::RecordTooLarge { record_type: 0x00FC, .. })
        ));
        assert!(out.is_empty());
    }
}

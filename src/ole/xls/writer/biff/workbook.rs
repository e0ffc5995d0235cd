//! Workbook-level BIFF8 record writers.

use crate::ole::xls::XlsResult;
use std::io::Write;

use super::{push_short_unicode_string, push_unicode_string, write_record, write_record_header};

/// Write BOF (Beginning of File) record
///
/// Record type: 0x0809
///
/// `substream_type` is 0x0005 for the workbook globals and 0x0010 for a
/// worksheet.
pub fn write_bof<W: Write>(writer: &mut W, substream_type: u16) -> XlsResult<()> {
    write_record_header(writer, 0x0809, 16)?;
    // BIFF8
    writer.write_all(&0x0600u16.to_le_bytes())?;
    writer.write_all(&substream_type.to_le_bytes())?;
    // rupBuild, rupYear
    writer.write_all(&0x0DBBu16.to_le_bytes())?;
    writer.write_all(&0x07CCu16.to_le_bytes())?;
    // bfh flags, lowest BIFF version
    writer.write_all(&0u32.to_le_bytes())?;
    writer.write_all(&6u32.to_le_bytes())?;
    Ok(())
}

/// Write EOF (End of File) record
///
/// Record type: 0x000A
pub fn write_eof<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x000A, 0)
}

/// Write CODEPAGE record
///
/// Record type: 0x0042
pub fn write_codepage<W: Write>(writer: &mut W, codepage: u16) -> XlsResult<()> {
    write_record_header(writer, 0x0042, 2)?;
    writer.write_all(&codepage.to_le_bytes())?;
    Ok(())
}

/// Write DATE1904 record
///
/// Record type: 0x0022
pub fn write_date1904<W: Write>(writer: &mut W, is_1904: bool) -> XlsResult<()> {
    write_record_header(writer, 0x0022, 2)?;
    writer.write_all(&u16::from(is_1904).to_le_bytes())?;
    Ok(())
}

/// Write WINDOW1 record (workbook window properties)
///
/// Record type: 0x003D
pub fn write_window1<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x003D, 18)?;
    // xWn, yWn, dxWn, dyWn
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0x3000u16.to_le_bytes())?;
    writer.write_all(&0x1E00u16.to_le_bytes())?;
    // grbit: horizontal and vertical scroll bars, sheet tabs
    writer.write_all(&0x0038u16.to_le_bytes())?;
    // itabCur, itabFirst, ctabSel, wTabRatio
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?;
    writer.write_all(&0x0258u16.to_le_bytes())?;
    Ok(())
}

/// Write FORMAT record (number format string)
///
/// Record type: 0x041E
pub fn write_format_record<W: Write>(
    writer: &mut W,
    index_code: u16,
    format_str: &str,
) -> XlsResult<()> {
    let mut data = Vec::with_capacity(5 + format_str.len());
    data.extend_from_slice(&index_code.to_le_bytes());
    push_unicode_string(&mut data, format_str);
    write_record(writer, 0x041E, &data)
}

/// Write the built-in STYLE records Excel expects.
///
/// Record type: 0x0293
///
/// XF indices refer to the fixed head of the XF table: style XF 0 is
/// Normal and style XFs 16..20 carry the comma, currency and percent
/// formats.
pub fn write_builtin_styles<W: Write>(writer: &mut W) -> XlsResult<()> {
    // (xf_index, builtin style id)
    const STYLES: [(u16, u8); 6] = [
        (0x0010, 3),
        (0x0011, 6),
        (0x0012, 4),
        (0x0013, 7),
        (0x0000, 0),
        (0x0014, 5),
    ];

    for (xf_index, builtin_id) in STYLES {
        write_record_header(writer, 0x0293, 4)?;
        // bit 15 marks a built-in style
        writer.write_all(&((xf_index & 0x0FFF) | 0x8000).to_le_bytes())?;
        // no outline level
        writer.write_all(&[builtin_id, 0xFF])?;
    }
    Ok(())
}

/// Write USESELFS record with natural language formulas turned off
///
/// Record type: 0x0160
pub fn write_usesel_fs<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x0160, 2)?;
    writer.write_all(&0u16.to_le_bytes())?;
    Ok(())
}

/// Write BOUNDSHEET8 record for a visible worksheet
///
/// Record type: 0x0085
///
/// `position` is the stream offset of the sheet's BOF record. It is usually
/// unknown when the record is written and patched afterwards at
/// [`BOUNDSHEET_POSITION_OFFSET`].
pub fn write_boundsheet<W: Write>(writer: &mut W, position: u32, name: &str) -> XlsResult<()> {
    let mut data = Vec::with_capacity(8 + name.len() * 2);
    data.extend_from_slice(&position.to_le_bytes());
    // hsState visible, dt worksheet
    data.extend_from_slice(&0u16.to_le_bytes());
    push_short_unicode_string(&mut data, name)?;
    write_record(writer, 0x0085, &data)
}

/// Offset of the BOF position field from the start of a BOUNDSHEET8 record
pub const BOUNDSHEET_POSITION_OFFSET: usize = 4;

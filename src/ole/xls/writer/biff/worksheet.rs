//! Worksheet-level BIFF8 record writers.

use crate::ole::xls::XlsResult;
use std::io::Write;

use super::write_record_header;

/// Write WSBOOL record
///
/// Record type: 0x0081
pub fn write_wsbool<W: Write>(writer: &mut W) -> XlsResult<()> {
    write_record_header(writer, 0x0081, 2)?;
    // show automatic page breaks, outline symbols below and right
    writer.write_all(&0x04C1u16.to_le_bytes())?;
    Ok(())
}

/// Write WINDOW2 record (worksheet view settings)
///
/// Record type: 0x023E
///
/// Only the first sheet is written as selected and active.
pub fn write_window2<W: Write>(writer: &mut W, active: bool) -> XlsResult<()> {
    const SELECTED_AND_ACTIVE: u16 = 0x0600;
    // gridlines, headings, zeros, default header color, outline symbols
    let mut grbit: u16 = 0x00B6;
    if active {
        grbit |= SELECTED_AND_ACTIVE;
    }

    write_record_header(writer, 0x023E, 18)?;
    writer.write_all(&grbit.to_le_bytes())?;
    // rwTop, colLeft
    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    // icvHdr
    writer.write_all(&0x0040u32.to_le_bytes())?;
    // wScaleSLV, wScaleNormal, reserved
    writer.write_all(&[0u8; 8])?;
    Ok(())
}

/// Write DIMENSIONS record
///
/// Record type: 0x0200
///
/// `last_row` and `last_col` are one past the last used cell.
pub fn write_dimensions<W: Write>(
    writer: &mut W,
    first_row: u32,
    last_row: u32,
    first_col: u16,
    last_col: u16,
) -> XlsResult<()> {
    write_record_header(writer, 0x0200, 14)?;
    writer.write_all(&first_row.to_le_bytes())?;
    writer.write_all(&last_row.to_le_bytes())?;
    writer.write_all(&first_col.to_le_bytes())?;
    writer.write_all(&last_col.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    Ok(())
}

/// Write COLINFO record for a single column
///
/// Record type: 0x007D
///
/// `width` is in 1/256 character units. The column keeps the default cell
/// XF (15).
pub fn write_colinfo<W: Write>(writer: &mut W, col: u16, width: u16) -> XlsResult<()> {
    // fUserSet: width was set explicitly
    const USER_SET: u16 = 0x0002;

    write_record_header(writer, 0x007D, 12)?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&width.to_le_bytes())?;
    writer.write_all(&15u16.to_le_bytes())?;
    writer.write_all(&USER_SET.to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?;
    Ok(())
}

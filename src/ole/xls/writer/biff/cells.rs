//! Cell record BIFF8 writers.

use crate::ole::xls::{XlsError, XlsResult};
use std::io::Write;

use super::write_record_header;

fn cell_row(row: u32, record: &str) -> XlsResult<u16> {
    u16::try_from(row).map_err(|_| {
        XlsError::InvalidData(format!(
            "Row index {} exceeds BIFF8 limit 65535 for {} record",
            row, record
        ))
    })
}

/// Write NUMBER record (floating point cell)
///
/// Record type: 0x0203
pub fn write_number<W: Write>(
    writer: &mut W,
    row: u32,
    col: u16,
    xf_index: u16,
    value: f64,
) -> XlsResult<()> {
    let row = cell_row(row, "NUMBER")?;
    write_record_header(writer, 0x0203, 14)?;
    writer.write_all(&row.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write LABELSST record (string cell referencing the SST)
///
/// Record type: 0x00FD
pub fn write_labelsst<W: Write>(
    writer: &mut W,
    row: u32,
    col: u16,
    xf_index: u16,
    sst_index: u32,
) -> XlsResult<()> {
    let row = cell_row(row, "LABELSST")?;
    write_record_header(writer, 0x00FD, 10)?;
    writer.write_all(&row.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    writer.write_all(&sst_index.to_le_bytes())?;
    Ok(())
}

/// Write BOOLERR record holding a boolean
///
/// Record type: 0x0205
pub fn write_boolerr<W: Write>(
    writer: &mut W,
    row: u32,
    col: u16,
    xf_index: u16,
    value: bool,
) -> XlsResult<()> {
    let row = cell_row(row, "BOOLERR")?;
    write_record_header(writer, 0x0205, 8)?;
    writer.write_all(&row.to_le_bytes())?;
    writer.write_all(&col.to_le_bytes())?;
    writer.write_all(&xf_index.to_le_bytes())?;
    // value, then fError = 0
    writer.write_all(&[u8::from(value), 0])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_record_layout() {
        let mut out = Vec::new();
        write_number(&mut out, 3, 2, 15, 1.5).unwrap();
        assert_eq!(&out[..4], &[0x03, 0x02, 14, 0]);
        assert_eq!(&out[4..10], &[3, 0, 2, 0, 15, 0]);
        assert_eq!(&out[10..], &1.5f64.to_le_bytes());
    }

    #[test]
    fn test_row_beyond_biff8_rejected() {
        let mut out = Vec::new();
        assert!(write_boolerr(&mut out, 70_000, 0, 15, true).is_err());
        assert!(out.is_empty());
    }
}

use crate::ole::xls::XlsResult;
use crate::ole::xls::writer::biff;
use crate::ole::xls::writer::formatting::FormattingManager;

use super::worksheet::{SharedStrings, StoredValue, WritableWorksheet};

/// Smallest Workbook stream Excel opens without complaint; shorter streams
/// would land in the compound file's mini stream.
pub(super) const MIN_WORKBOOK_STREAM_LEN: usize = 4096;

/// Everything the Workbook stream is generated from
pub(super) struct WorkbookParts<'a> {
    pub use_1904_dates: bool,
    pub fmt: &'a FormattingManager,
    pub shared_strings: &'a SharedStrings,
    pub worksheets: &'a [WritableWorksheet],
}

pub(super) fn generate_workbook_stream(parts: &WorkbookParts<'_>) -> XlsResult<Vec<u8>> {
    let mut stream = Vec::new();

    // === Workbook Globals ===
    biff::write_bof(&mut stream, biff::BOF_WORKBOOK_GLOBALS)?;
    // BIFF8 strings are Unicode
    biff::write_codepage(&mut stream, 0x04B0)?;
    biff::write_date1904(&mut stream, parts.use_1904_dates)?;
    biff::write_window1(&mut stream)?;

    parts.fmt.write_fonts(&mut stream)?;
    parts.fmt.write_number_formats(&mut stream)?;
    parts.fmt.write_formats(&mut stream)?;

    biff::write_builtin_styles(&mut stream)?;
    biff::write_usesel_fs(&mut stream)?;

    // Positions are patched once each sheet's BOF offset is known
    let mut boundsheet_positions = Vec::with_capacity(parts.worksheets.len());
    for worksheet in parts.worksheets {
        boundsheet_positions.push(stream.len());
        biff::write_boundsheet(&mut stream, 0, &worksheet.name)?;
    }

    if !parts.shared_strings.strings.is_empty() {
        biff::write_sst(
            &mut stream,
            &parts.shared_strings.strings,
            parts.shared_strings.total,
        )?;
    }

    biff::write_eof(&mut stream)?;

    // === Worksheets ===
    for (index, worksheet) in parts.worksheets.iter().enumerate() {
        let bof_position = stream.len() as u32;
        let patch_at = boundsheet_positions[index] + biff::BOUNDSHEET_POSITION_OFFSET;
        stream[patch_at..patch_at + 4].copy_from_slice(&bof_position.to_le_bytes());

        write_worksheet(&mut stream, parts.fmt, worksheet, index == 0)?;
    }

    if stream.len() < MIN_WORKBOOK_STREAM_LEN {
        stream.resize(MIN_WORKBOOK_STREAM_LEN, 0);
    }

    Ok(stream)
}

fn write_worksheet(
    stream: &mut Vec<u8>,
    fmt: &FormattingManager,
    worksheet: &WritableWorksheet,
    active: bool,
) -> XlsResult<()> {
    // Record order follows the worksheet substream grammar: COLINFO before
    // DIMENSIONS, WINDOW2 after the cell table.
    biff::write_bof(stream, biff::BOF_WORKSHEET)?;
    biff::write_wsbool(stream)?;
    for (&col, &width) in &worksheet.column_widths {
        biff::write_colinfo(stream, col, width)?;
    }
    biff::write_dimensions(
        stream,
        worksheet.first_row,
        worksheet.last_row,
        worksheet.first_col,
        worksheet.last_col,
    )?;

    for (&(row, col), cell) in &worksheet.cells {
        let xf_index = fmt.cell_xf_index_for(cell.format_idx);
        match cell.value {
            StoredValue::Number(value) => biff::write_number(stream, row, col, xf_index, value)?,
            StoredValue::Sst(sst_index) => {
                biff::write_labelsst(stream, row, col, xf_index, sst_index)?
            },
            StoredValue::Boolean(value) => biff::write_boolerr(stream, row, col, xf_index, value)?,
        }
    }

    biff::write_window2(stream, active)?;
    biff::write_eof(stream)
}

//! Zip packaging of the workbook parts.

use super::constants::{
    CONTENT_TYPES_PART, ROOT_RELS_PART, STYLES_PART, WORKBOOK_PART, WORKBOOK_RELS_PART,
    worksheet_part,
};
use super::sheet::StreamingSheet;
use super::styles::StylesBuilder;
use super::workbook::{content_types_xml, root_rels_xml, workbook_rels_xml, workbook_xml};
use crate::sheet::Result as SheetResult;
use std::io::{Seek, Write};
use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Sheet parts larger than this need Zip64 sizes. The margin covers the
/// header elements written around the spilled rows.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64 - (1 << 20);

/// Write a complete `.xlsx` package to `out`.
///
/// The first sheet is tab-selected. `sheets` must not be empty.
pub fn write_package<W: Write + Seek>(
    out: &mut W,
    sheets: &mut [StreamingSheet],
    styles: &StylesBuilder,
    date1904: bool,
) -> SheetResult<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(out);

    zip.start_file(CONTENT_TYPES_PART, options)?;
    zip.write_all(content_types_xml(sheets.len()).as_bytes())?;

    zip.start_file(ROOT_RELS_PART, options)?;
    zip.write_all(root_rels_xml().as_bytes())?;

    let names: Vec<&str> = sheets.iter().map(StreamingSheet::name).collect();
    zip.start_file(WORKBOOK_PART, options)?;
    zip.write_all(workbook_xml(&names, date1904).as_bytes())?;

    zip.start_file(WORKBOOK_RELS_PART, options)?;
    zip.write_all(workbook_rels_xml(sheets.len()).as_bytes())?;

    zip.start_file(STYLES_PART, options)?;
    zip.write_all(styles.to_xml().as_bytes())?;

    for (index, sheet) in sheets.iter_mut().enumerate() {
        let large = sheet.spilled_bytes() > ZIP64_THRESHOLD;
        debug!(sheet = sheet.name(), bytes = sheet.spilled_bytes(), large, "packaging worksheet");
        zip.start_file(worksheet_part(index + 1), options.large_file(large))?;
        sheet.write_part(&mut zip, index == 0)?;
    }

    zip.finish()?;
    Ok(())
}

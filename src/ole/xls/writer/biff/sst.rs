//! Shared String Table (SST) BIFF8 writer.

use crate::ole::xls::XlsResult;
use std::io::Write;

use super::{MAX_RECORD_DATA, needs_utf16, write_record};

const SST: u16 = 0x00FC;
const CONTINUE: u16 = 0x003C;

/// A record that spills into CONTINUE records when its payload fills up.
struct ContinuedRecord<'w, W: Write> {
    writer: &'w mut W,
    record_type: u16,
    buf: Vec<u8>,
}

impl<'w, W: Write> ContinuedRecord<'w, W> {
    fn new(writer: &'w mut W, record_type: u16) -> Self {
        Self {
            writer,
            record_type,
            buf: Vec::with_capacity(MAX_RECORD_DATA),
        }
    }

    fn room(&self) -> usize {
        MAX_RECORD_DATA - self.buf.len()
    }

    fn flush(&mut self) -> XlsResult<()> {
        write_record(self.writer, self.record_type, &self.buf)?;
        self.buf.clear();
        self.record_type = CONTINUE;
        Ok(())
    }
}

/// Write the SST record and as many CONTINUE records as it needs.
///
/// `cst_total` counts every string cell; `strings` holds the unique strings.
/// A string header never straddles a record boundary. When character data
/// does, the CONTINUE record restarts with the string's option byte and
/// UTF-16 characters are never split.
pub fn write_sst<W: Write>(writer: &mut W, strings: &[String], cst_total: u32) -> XlsResult<()> {
    let mut record = ContinuedRecord::new(writer, SST);
    record.buf.extend_from_slice(&cst_total.to_le_bytes());
    record.buf.extend_from_slice(&(strings.len() as u32).to_le_bytes());

    for s in strings {
        let wide = needs_utf16(s);
        let char_size = if wide { 2 } else { 1 };
        let units: Vec<u16> = s.encode_utf16().collect();

        if record.room() < 3 + char_size {
            record.flush()?;
        }
        record.buf.extend_from_slice(&(units.len() as u16).to_le_bytes());
        record.buf.push(u8::from(wide));

        let mut rest = units.as_slice();
        loop {
            let take = (record.room() / char_size).min(rest.len());
            for &unit in &rest[..take] {
                if wide {
                    record.buf.extend_from_slice(&unit.to_le_bytes());
                } else {
                    record.buf.push(unit as u8);
                }
            }
            rest = &rest[take..];
            if rest.is_empty() {
                break;
            }
            record.flush()?;
            record.buf.push(u8::from(wide));
        }
    }

    record.flush()
}

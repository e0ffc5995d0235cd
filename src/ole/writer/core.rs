//! Compound file writer.
//!
//! Streams are buffered in memory and laid out when `write_to` is called:
//!
//! 1. Streams of at least 4096 bytes get regular sector chains, in the
//!    order they were added. The first large stream therefore starts at
//!    sector 0, which is where Excel expects `Workbook`.
//! 2. Small streams are packed into the mini stream, which follows them.
//! 3. The directory and the MiniFAT come next.
//! 4. FAT and DIFAT sectors are reserved last. Their count depends on the
//!    total, so it is iterated until stable.
//!
//! A sector's file offset is `(id + 1) * 512` because the header occupies
//! the first 512 bytes.

use super::super::consts::*;
use super::super::error::OleError;
use super::difat::DifatBuilder;
use super::directory::DirectoryBuilder;
use super::fat::FatBuilder;
use super::header::HeaderBuilder;
use super::minifat::MiniFatBuilder;
use std::io::{Seek, SeekFrom, Write};

/// Writer for version 3 compound files holding root-level streams.
///
/// # Example
///
/// ```rust
/// use access2excel::ole::writer::OleWriter;
/// use std::io::Cursor;
///
/// let mut writer = OleWriter::new();
/// writer.create_stream("Workbook", vec![0u8; 4096])?;
///
/// let mut out = Cursor::new(Vec::new());
/// writer.write_to(&mut out)?;
/// assert_eq!(&out.get_ref()[0..4], b"\xD0\xCF\x11\xE0");
/// # Ok::<(), access2excel::ole::OleError>(())
/// ```
#[derive(Debug, Default)]
pub struct OleWriter {
    /// (name, data) in insertion order
    streams: Vec<(String, Vec<u8>)>,
}

impl OleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream under the root storage, replacing one of the same name.
    pub fn create_stream(&mut self, name: &str, data: Vec<u8>) -> Result<(), OleError> {
        if name.is_empty() {
            return Err(OleError::InvalidData("Empty stream name".to_string()));
        }
        if name.encode_utf16().count() > 31 {
            return Err(OleError::InvalidData(format!(
                "Stream name too long: {}",
                name
            )));
        }
        if name.contains(['/', '\\', ':', '!']) {
            return Err(OleError::InvalidData(format!(
                "Illegal character in stream name: {}",
                name
            )));
        }

        match self.streams.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = data,
            None => self.streams.push((name.to_string(), data)),
        }
        Ok(())
    }

    /// Number of streams added so far.
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /// Lay out all sectors and write the complete file.
    pub fn write_to<W: Write + Seek>(&self, writer: &mut W) -> Result<(), OleError> {
        let mut fat = FatBuilder::new();
        let mut minifat = MiniFatBuilder::new();

        // (stream index, start sector) for each size class
        let mut large = Vec::new();
        let mut small = Vec::new();
        for (idx, (_, data)) in self.streams.iter().enumerate() {
            if data.len() >= MINI_STREAM_CUTOFF {
                large.push((idx, fat.allocate_chain(data.len())));
            }
        }
        for (idx, (_, data)) in self.streams.iter().enumerate() {
            if data.len() < MINI_STREAM_CUTOFF {
                small.push((idx, minifat.allocate_mini_chain(data)));
            }
        }

        let (ministream_start, ministream_size) = if minifat.is_empty() {
            (ENDOFCHAIN, 0)
        } else {
            let ministream = minifat.ministream_data();
            (
                fat.allocate_chain(ministream.len()),
                ministream.len() as u64,
            )
        };

        let mut directory = DirectoryBuilder::new(ministream_start, ministream_size);
        for &(idx, start) in large.iter().chain(&small) {
            let (name, data) = &self.streams[idx];
            directory.add_stream(name, start, data.len() as u64);
        }
        let dir_stream = directory.generate_directory_stream();
        let dir_start = fat.allocate_chain(dir_stream.len());

        let minifat_sectors = minifat.generate_minifat_sectors();
        let minifat_start = fat.allocate_chain(minifat_sectors.len() * SECTOR_SIZE_V3);

        let (n_fat, n_difat) = fat_sector_counts(fat.total_sectors());
        let difat_start = fat.allocate_special(n_difat, DIFSECT);
        let fat_start = fat.allocate_special(n_fat, FATSECT);
        fat.validate()?;

        let fat_sectors = fat.generate_fat_sectors();
        if fat_sectors.len() as u32 != n_fat {
            return Err(OleError::CorruptedFile(format!(
                "FAT needs {} sectors but {} were reserved",
                fat_sectors.len(),
                n_fat
            )));
        }
        let fat_ids: Vec<u32> = (fat_start..fat_start + n_fat).collect();
        let difat = DifatBuilder::new(&fat_ids);

        let mut header = HeaderBuilder::new();
        header.set_first_dir_sector(dir_start);
        header.set_minifat(minifat_start, minifat_sectors.len() as u32);
        header.set_fat_sectors(&fat_ids);
        if n_difat > 0 {
            header.set_difat(difat_start, n_difat);
        }

        writer.seek(SeekFrom::Start(0))?;
        writer.write_all(&header.generate())?;

        for &(idx, start) in &large {
            write_chain(writer, start, &self.streams[idx].1)?;
        }
        if ministream_start != ENDOFCHAIN {
            write_chain(writer, ministream_start, minifat.ministream_data())?;
        }
        write_chain(writer, dir_start, &dir_stream)?;
        for (i, sector) in minifat_sectors.iter().enumerate() {
            write_chain(writer, minifat_start + i as u32, sector)?;
        }
        for (i, sector) in difat.generate_difat_sectors(difat_start).iter().enumerate() {
            write_chain(writer, difat_start + i as u32, sector)?;
        }
        for (i, sector) in fat_sectors.iter().enumerate() {
            write_chain(writer, fat_start + i as u32, sector)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// FAT and DIFAT sector counts once they are themselves accounted for.
fn fat_sector_counts(used: u32) -> (u32, u32) {
    let per_fat = (SECTOR_SIZE_V3 / 4) as u32;
    let mut n_fat = 0;
    let mut n_difat = 0;
    loop {
        let fat = (used + n_fat + n_difat).div_ceil(per_fat);
        let difat = DifatBuilder::sector_count_for(fat);
        if fat == n_fat && difat == n_difat {
            return (n_fat, n_difat);
        }
        n_fat = fat;
        n_difat = difat;
    }
}

/// Write `data` into contiguous sectors starting at `start`, zero-padded.
fn write_chain<W: Write + Seek>(writer: &mut W, start: u32, data: &[u8]) -> Result<(), OleError> {
    if start == ENDOFCHAIN || data.is_empty() {
        return Ok(());
    }
    writer.seek(SeekFrom::Start((start as u64 + 1) * SECTOR_SIZE_V3 as u64))?;
    writer.write_all(data)?;
    let padding = data.len().next_multiple_of(SECTOR_SIZE_V3) - data.len();
    if padding > 0 {
        writer.write_all(&[0u8; SECTOR_SIZE_V3][..padding])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_names_are_validated() {
        let mut writer = OleWriter::new();
        assert!(writer.create_stream("", Vec::new()).is_err());
        assert!(writer.create_stream("a/b", Vec::new()).is_err());
        assert!(writer.create_stream(&"x".repeat(32), Vec::new()).is_err());
        assert!(writer.create_stream("Workbook", Vec::new()).is_ok());
    }

    #[test]
    fn test_create_stream_replaces_existing() {
        let mut writer = OleWriter::new();
        writer.create_stream("Workbook", vec![1]).unwrap();
        writer.create_stream("Workbook", vec![2, 3]).unwrap();
        assert_eq!(writer.stream_count(), 1);
        assert_eq!(writer.streams[0].1, vec![2, 3]);
    }

    #[test]
    fn test_fat_counts_include_themselves() {
        assert_eq!(fat_sector_counts(0), (0, 0));
        assert_eq!(fat_sector_counts(3), (1, 0));
        // 127 used + 1 FAT sector fills exactly one FAT sector
        assert_eq!(fat_sector_counts(127), (1, 0));
        assert_eq!(fat_sector_counts(128), (2, 0));
    }
}

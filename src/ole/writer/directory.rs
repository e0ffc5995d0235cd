//! Directory stream for a flat compound file.
//!
//! Every stream is a direct child of the root storage. Siblings form a
//! binary tree ordered by name length first, then by upper-cased name;
//! readers locate entries by walking that tree, so the ordering has to
//! match what Office expects. The midpoint of the sorted list becomes the
//! root's child, earlier entries hang off its left link and later ones
//! off its right link.

use super::super::consts::*;
use std::cmp::Ordering;

/// One 128-byte directory entry
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub entry_type: u8,
    pub start_sector: u32,
    pub size: u64,
    pub sid_left: u32,
    pub sid_right: u32,
    pub sid_child: u32,
}

impl DirectoryEntry {
    fn root(ministream_start: u32, ministream_size: u64) -> Self {
        Self {
            name: "Root Entry".to_string(),
            entry_type: STGTY_ROOT,
            start_sector: ministream_start,
            size: ministream_size,
            sid_left: NOSTREAM,
            sid_right: NOSTREAM,
            sid_child: NOSTREAM,
        }
    }

    fn stream(name: &str, start_sector: u32, size: u64) -> Self {
        Self {
            name: name.to_string(),
            entry_type: STGTY_STREAM,
            start_sector,
            size,
            sid_left: NOSTREAM,
            sid_right: NOSTREAM,
            sid_child: NOSTREAM,
        }
    }

    pub fn to_bytes(&self) -> [u8; DIRENTRY_SIZE] {
        let mut data = [0u8; DIRENTRY_SIZE];

        // Up to 31 UTF-16 units plus the terminator
        let units: Vec<u16> = self.name.encode_utf16().take(31).collect();
        for (slot, unit) in data[..64].chunks_exact_mut(2).zip(&units) {
            slot.copy_from_slice(&unit.to_le_bytes());
        }
        let name_len = ((units.len() + 1) * 2) as u16;
        data[64..66].copy_from_slice(&name_len.to_le_bytes());

        data[66] = self.entry_type;
        // Black node
        data[67] = 1;
        data[68..72].copy_from_slice(&self.sid_left.to_le_bytes());
        data[72..76].copy_from_slice(&self.sid_right.to_le_bytes());
        data[76..80].copy_from_slice(&self.sid_child.to_le_bytes());
        data[116..120].copy_from_slice(&self.start_sector.to_le_bytes());
        data[120..128].copy_from_slice(&self.size.to_le_bytes());

        data
    }
}

/// Collects the root and its streams; the SID is the index.
#[derive(Debug)]
pub struct DirectoryBuilder {
    entries: Vec<DirectoryEntry>,
}

impl DirectoryBuilder {
    pub fn new(ministream_start: u32, ministream_size: u64) -> Self {
        Self {
            entries: vec![DirectoryEntry::root(ministream_start, ministream_size)],
        }
    }

    /// Append a stream under the root and return its SID.
    pub fn add_stream(&mut self, name: &str, start_sector: u32, size: u64) -> u32 {
        let sid = self.entries.len() as u32;
        self.entries
            .push(DirectoryEntry::stream(name, start_sector, size));
        sid
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Link the sibling tree and serialize all entries in SID order.
    pub fn generate_directory_stream(&mut self) -> Vec<u8> {
        self.link_children();

        let mut data = Vec::with_capacity(self.entries.len() * DIRENTRY_SIZE);
        for entry in &self.entries {
            data.extend_from_slice(&entry.to_bytes());
        }
        data
    }

    fn link_children(&mut self) {
        let mut sorted: Vec<u32> = (1..self.entries.len() as u32).collect();
        if sorted.is_empty() {
            self.entries[0].sid_child = NOSTREAM;
            return;
        }

        sorted.sort_by(|&a, &b| {
            compare_names(&self.entries[a as usize].name, &self.entries[b as usize].name)
        });

        let midpoint = sorted.len() / 2;
        self.entries[0].sid_child = sorted[midpoint];

        for (pos, &sid) in sorted.iter().enumerate() {
            let entry = &mut self.entries[sid as usize];
            entry.sid_left = NOSTREAM;
            entry.sid_right = NOSTREAM;
            if pos > 0 && pos <= midpoint {
                entry.sid_left = sorted[pos - 1];
            }
            if pos >= midpoint && pos + 1 < sorted.len() {
                entry.sid_right = sorted[pos + 1];
            }
        }
    }
}

/// Sibling order: shorter names first, then case-insensitive.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.encode_utf16()
        .count()
        .cmp(&b.encode_utf16().count())
        .then_with(|| a.to_uppercase().cmp(&b.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[test]
    fn test_entry_encoding() {
        let entry = DirectoryEntry::stream("Workbook", 3, 4096);
        let bytes = entry.to_bytes();

        assert_eq!(&bytes[0..2], &[b'W', 0]);
        assert_eq!(&bytes[64..66], &18u16.to_le_bytes());
        assert_eq!(bytes[66], STGTY_STREAM);
        assert_eq!(u32_at(&bytes, 116), 3);
        assert_eq!(u32_at(&bytes, 120), 4096);
    }

    #[test]
    fn test_single_stream_is_root_child() {
        let mut dir = DirectoryBuilder::new(ENDOFCHAIN, 0);
        let sid = dir.add_stream("Workbook", 0, 8192);
        assert_eq!(sid, 1);

        let data = dir.generate_directory_stream();
        assert_eq!(data.len(), 2 * DIRENTRY_SIZE);
        assert_eq!(u32_at(&data, 76), 1);
        assert_eq!(u32_at(&data, DIRENTRY_SIZE + 68), NOSTREAM);
        assert_eq!(u32_at(&data, DIRENTRY_SIZE + 72), NOSTREAM);
    }

    #[test]
    fn test_siblings_sorted_by_length_then_name() {
        let mut dir = DirectoryBuilder::new(ENDOFCHAIN, 0);
        let workbook = dir.add_stream("Workbook", 0, 0);
        let b = dir.add_stream("bb", 0, 0);
        let a = dir.add_stream("AA", 0, 0);
        dir.generate_directory_stream();

        // Sorted: AA, bb, Workbook; bb is the midpoint
        assert_eq!(dir.entries[0].sid_child, b);
        assert_eq!(dir.entries[b as usize].sid_left, a);
        assert_eq!(dir.entries[b as usize].sid_right, workbook);
        assert_eq!(dir.entries[a as usize].sid_left, NOSTREAM);
        assert_eq!(dir.entries[workbook as usize].sid_right, NOSTREAM);
    }

    #[test]
    fn test_empty_root_has_no_child() {
        let mut dir = DirectoryBuilder::new(ENDOFCHAIN, 0);
        let data = dir.generate_directory_stream();
        assert_eq!(dir.entry_count(), 1);
        assert_eq!(u32_at(&data, 76), NOSTREAM);
    }
}

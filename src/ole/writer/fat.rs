//! Sector allocation table for the compound file writer.
//!
//! Every regular sector in the file owns one FAT slot. Stream sectors hold
//! the id of the next sector in their chain, the last one holds
//! `ENDOFCHAIN`. Sectors that store the FAT itself are marked `FATSECT`,
//! DIFAT sectors `DIFSECT`.

use super::super::consts::*;
use super::super::error::OleError;

/// Builds the FAT while sectors are handed out in file order.
#[derive(Debug, Default)]
pub struct FatBuilder {
    /// Next-sector table, indexed by sector id
    fat: Vec<u32>,
}

impl FatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve enough contiguous sectors for `size` bytes and link them.
    ///
    /// Returns the first sector, or `ENDOFCHAIN` for an empty stream.
    pub fn allocate_chain(&mut self, size: usize) -> u32 {
        if size == 0 {
            return ENDOFCHAIN;
        }

        let count = size.div_ceil(SECTOR_SIZE_V3) as u32;
        let start = self.total_sectors();
        self.fat.reserve(count as usize);
        for sector in start..start + count {
            let next = if sector + 1 < start + count {
                sector + 1
            } else {
                ENDOFCHAIN
            };
            self.fat.push(next);
        }

        start
    }

    /// Reserve `count` sectors tagged with `marker` (`FATSECT` or `DIFSECT`).
    pub fn allocate_special(&mut self, count: u32, marker: u32) -> u32 {
        if count == 0 {
            return ENDOFCHAIN;
        }

        let start = self.total_sectors();
        self.fat.extend(std::iter::repeat_n(marker, count as usize));
        start
    }

    /// Number of sectors handed out so far.
    pub fn total_sectors(&self) -> u32 {
        self.fat.len() as u32
    }

    pub fn entries(&self) -> &[u32] {
        &self.fat
    }

    /// Serialize the table into whole sectors, padding with `FREESECT`.
    pub fn generate_fat_sectors(&self) -> Vec<Vec<u8>> {
        table_sectors(&self.fat)
    }

    /// Check that every chain stays inside the table and terminates.
    pub fn validate(&self) -> Result<(), OleError> {
        let len = self.fat.len() as u32;
        for (sector, &next) in self.fat.iter().enumerate() {
            match next {
                ENDOFCHAIN | FREESECT | FATSECT | DIFSECT => {},
                n if n >= len => {
                    return Err(OleError::CorruptedFile(format!(
                        "sector {} points past the end of the FAT ({})",
                        sector, n
                    )));
                },
                n if n as usize <= sector => {
                    return Err(OleError::CorruptedFile(format!(
                        "sector {} links backwards to {}",
                        sector, n
                    )));
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// Pack a table of little-endian u32 ids into 512-byte sectors.
///
/// Shared by the FAT and the MiniFAT; unused slots are `FREESECT`.
pub(super) fn table_sectors(entries: &[u32]) -> Vec<Vec<u8>> {
    let per_sector = SECTOR_SIZE_V3 / 4;
    entries
        .chunks(per_sector)
        .map(|chunk| {
            let mut sector = vec![0xFFu8; SECTOR_SIZE_V3];
            for (slot, id) in sector.chunks_exact_mut(4).zip(chunk) {
                slot.copy_from_slice(&id.to_le_bytes());
            }
            sector
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_chain_links_sectors() {
        let mut fat = FatBuilder::new();

        let start = fat.allocate_chain(1024);
        assert_eq!(start, 0);
        assert_eq!(fat.total_sectors(), 2);
        assert_eq!(fat.entries(), &[1, ENDOFCHAIN]);

        // A second stream starts where the first ended
        let next = fat.allocate_chain(1);
        assert_eq!(next, 2);
        assert_eq!(fat.entries()[2], ENDOFCHAIN);
    }

    #[test]
    fn test_empty_chain_allocates_nothing() {
        let mut fat = FatBuilder::new();
        assert_eq!(fat.allocate_chain(0), ENDOFCHAIN);
        assert_eq!(fat.total_sectors(), 0);
    }

    #[test]
    fn test_special_sectors_are_marked() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(512);
        let start = fat.allocate_special(2, FATSECT);

        assert_eq!(start, 1);
        assert_eq!(&fat.entries()[1..], &[FATSECT, FATSECT]);
        assert!(fat.validate().is_ok());
    }

    #[test]
    fn test_fat_sectors_padded_with_freesect() {
        let mut fat = FatBuilder::new();
        fat.allocate_chain(512 * 3);

        let sectors = fat.generate_fat_sectors();
        assert_eq!(sectors.len(), 1);
        assert_eq!(&sectors[0][0..4], &1u32.to_le_bytes());
        assert_eq!(&sectors[0][8..12], &ENDOFCHAIN.to_le_bytes());
        assert_eq!(&sectors[0][12..16], &FREESECT.to_le_bytes());
    }

    #[test]
    fn test_table_spills_into_second_sector() {
        let entries = vec![ENDOFCHAIN; 129];
        let sectors = table_sectors(&entries);
        assert_eq!(sectors.len(), 2);
        assert_eq!(&sectors[1][0..4], &ENDOFCHAIN.to_le_bytes());
        assert_eq!(&sectors[1][4..8], &FREESECT.to_le_bytes());
    }
}

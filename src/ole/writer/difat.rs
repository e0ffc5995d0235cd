//! DIFAT sectors for files whose FAT outgrows the header.
//!
//! The header lists the first 109 FAT sectors. Further FAT sector ids are
//! chained through DIFAT sectors, 127 ids each followed by the id of the
//! next DIFAT sector.

use super::super::consts::*;

/// FAT sector ids that do not fit into the header
#[derive(Debug, Default)]
pub struct DifatBuilder {
    overflow: Vec<u32>,
}

impl DifatBuilder {
    pub fn new(fat_sectors: &[u32]) -> Self {
        Self {
            overflow: fat_sectors
                .get(HEADER_DIFAT_ENTRIES..)
                .map(<[u32]>::to_vec)
                .unwrap_or_default(),
        }
    }

    /// Number of DIFAT sectors needed for `fat_sector_count` FAT sectors.
    pub fn sector_count_for(fat_sector_count: u32) -> u32 {
        let over = fat_sector_count.saturating_sub(HEADER_DIFAT_ENTRIES as u32);
        over.div_ceil(ids_per_sector() as u32)
    }

    pub fn sector_count(&self) -> u32 {
        self.overflow.len().div_ceil(ids_per_sector()) as u32
    }

    /// Serialize the chain; DIFAT sectors are assumed contiguous from `first`.
    pub fn generate_difat_sectors(&self, first: u32) -> Vec<Vec<u8>> {
        let total = self.sector_count();
        self.overflow
            .chunks(ids_per_sector())
            .enumerate()
            .map(|(idx, ids)| {
                let mut sector = vec![0xFFu8; SECTOR_SIZE_V3];
                for (slot, id) in sector.chunks_exact_mut(4).zip(ids) {
                    slot.copy_from_slice(&id.to_le_bytes());
                }
                let idx = idx as u32;
                let next = if idx + 1 < total {
                    first + idx + 1
                } else {
                    ENDOFCHAIN
                };
                sector[SECTOR_SIZE_V3 - 4..].copy_from_slice(&next.to_le_bytes());
                sector
            })
            .collect()
    }
}

fn ids_per_sector() -> usize {
    SECTOR_SIZE_V3 / 4 - 1
}

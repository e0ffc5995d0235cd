//! Mini stream allocation for small streams.
//!
//! Streams under the cutoff are packed into 64-byte mini sectors inside
//! the root entry's mini stream instead of occupying whole sectors.

use super::super::consts::*;
use super::fat::table_sectors;

#[derive(Debug, Default)]
pub struct MiniFatBuilder {
    /// Next-mini-sector table
    minifat: Vec<u32>,
    /// Concatenated small streams, each padded to a mini sector boundary
    ministream: Vec<u8>,
}

impl MiniFatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `data` into the mini stream and return its first mini sector.
    pub fn allocate_mini_chain(&mut self, data: &[u8]) -> u32 {
        if data.is_empty() {
            return ENDOFCHAIN;
        }

        let count = data.len().div_ceil(MINI_SECTOR_SIZE) as u32;
        let start = self.minifat.len() as u32;
        for sector in start..start + count {
            let next = if sector + 1 < start + count {
                sector + 1
            } else {
                ENDOFCHAIN
            };
            self.minifat.push(next);
        }

        let offset = self.ministream.len();
        self.ministream
            .resize(offset + count as usize * MINI_SECTOR_SIZE, 0);
        self.ministream[offset..offset + data.len()].copy_from_slice(data);

        start
    }

    pub fn ministream_data(&self) -> &[u8] {
        &self.ministream
    }

    pub fn is_empty(&self) -> bool {
        self.minifat.is_empty()
    }

    pub fn entries(&self) -> &[u32] {
        &self.minifat
    }

    pub fn generate_minifat_sectors(&self) -> Vec<Vec<u8>> {
        table_sectors(&self.minifat)
    }
}

//! The 512-byte compound file header.

use super::super::consts::*;

/// Header fields that depend on the sector layout
#[derive(Debug)]
pub struct HeaderBuilder {
    first_dir_sector: u32,
    first_minifat_sector: u32,
    num_minifat_sectors: u32,
    first_difat_sector: u32,
    num_difat_sectors: u32,
    fat_sectors: Vec<u32>,
}

impl Default for HeaderBuilder {
    fn default() -> Self {
        Self {
            first_dir_sector: 0,
            first_minifat_sector: ENDOFCHAIN,
            num_minifat_sectors: 0,
            first_difat_sector: ENDOFCHAIN,
            num_difat_sectors: 0,
            fat_sectors: Vec::new(),
        }
    }
}

impl HeaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_first_dir_sector(&mut self, sector: u32) {
        self.first_dir_sector = sector;
    }

    pub fn set_minifat(&mut self, first_sector: u32, num_sectors: u32) {
        self.first_minifat_sector = first_sector;
        self.num_minifat_sectors = num_sectors;
    }

    pub fn set_difat(&mut self, first_sector: u32, num_sectors: u32) {
        self.first_difat_sector = first_sector;
        self.num_difat_sectors = num_sectors;
    }

    /// All FAT sector ids; only the first 109 are stored in the header.
    pub fn set_fat_sectors(&mut self, sectors: &[u32]) {
        self.fat_sectors = sectors.to_vec();
    }

    pub fn generate(&self) -> [u8; SECTOR_SIZE_V3] {
        let mut header = [0u8; SECTOR_SIZE_V3];

        header[0..8].copy_from_slice(MAGIC);
        // 8..24 CLSID stays zero
        header[24..26].copy_from_slice(&0x003Eu16.to_le_bytes());
        // Version 3 with 512-byte sectors
        header[26..28].copy_from_slice(&3u16.to_le_bytes());
        header[28..30].copy_from_slice(&0xFFFEu16.to_le_bytes());
        header[30..32].copy_from_slice(&9u16.to_le_bytes());
        header[32..34].copy_from_slice(&6u16.to_le_bytes());
        // 40..44 directory sector count must be 0 for version 3
        header[44..48].copy_from_slice(&(self.fat_sectors.len() as u32).to_le_bytes());
        header[48..52].copy_from_slice(&self.first_dir_sector.to_le_bytes());
        header[56..60].copy_from_slice(&(MINI_STREAM_CUTOFF as u32).to_le_bytes());
        header[60..64].copy_from_slice(&self.first_minifat_sector.to_le_bytes());
        header[64..68].copy_from_slice(&self.num_minifat_sectors.to_le_bytes());
        header[68..72].copy_from_slice(&self.first_difat_sector.to_le_bytes());
        header[72..76].copy_from_slice(&self.num_difat_sectors.to_le_bytes());

        for (i, slot) in header[76..].chunks_exact_mut(4).enumerate() {
            let id = self.fat_sectors.get(i).copied().unwrap_or(FREESECT);
            slot.copy_from_slice(&id.to_le_bytes());
        }

        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let mut builder = HeaderBuilder::new();
        builder.set_first_dir_sector(10);
        builder.set_fat_sectors(&[11, 12]);

        let header = builder.generate();

        assert_eq!(&header[0..8], MAGIC);
        assert_eq!(&header[26..28], &3u16.to_le_bytes());
        assert_eq!(&header[28..30], &0xFFFEu16.to_le_bytes());
        assert_eq!(&header[30..32], &9u16.to_le_bytes());
        assert_eq!(&header[44..48], &2u32.to_le_bytes());
        assert_eq!(&header[48..52], &10u32.to_le_bytes());
        assert_eq!(&header[60..64], &ENDOFCHAIN.to_le_bytes());
        assert_eq!(&header[76..80], &11u32.to_le_bytes());
        assert_eq!(&header[80..84], &12u32.to_le_bytes());
        assert_eq!(&header[84..88], &FREESECT.to_le_bytes());
        assert_eq!(&header[508..512], &FREESECT.to_le_bytes());
    }
}

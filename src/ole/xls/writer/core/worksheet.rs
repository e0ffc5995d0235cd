use std::collections::{BTreeMap, HashMap};

/// Cell payload as stored until the stream is generated
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum StoredValue {
    Number(f64),
    /// Index into the shared string table
    Sst(u32),
    Boolean(bool),
}

#[derive(Debug, Clone, Copy)]
pub(super) struct WritableCell {
    pub value: StoredValue,
    pub format_idx: u16,
}

/// Deduplicated strings referenced by LABELSST records
#[derive(Debug, Default)]
pub(super) struct SharedStrings {
    pub strings: Vec<String>,
    index: HashMap<String, u32>,
    /// Every string cell, duplicates included
    pub total: u32,
}

impl SharedStrings {
    pub(super) fn intern(&mut self, value: &str) -> u32 {
        self.total = self.total.saturating_add(1);
        if let Some(&idx) = self.index.get(value) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(value.to_string());
        self.index.insert(value.to_string(), idx);
        idx
    }
}

/// Represents a worksheet in the writer
#[derive(Debug)]
pub(super) struct WritableWorksheet {
    pub name: String,
    /// Cells keyed by (row, col), iterated in record order
    pub cells: BTreeMap<(u32, u16), WritableCell>,
    /// First used row
    pub first_row: u32,
    /// Last used row (exclusive)
    pub last_row: u32,
    /// First used column
    pub first_col: u16,
    /// Last used column (exclusive)
    pub last_col: u16,
    /// Per-column widths in 1/256 character units
    pub column_widths: BTreeMap<u16, u16>,
}

impl WritableWorksheet {
    pub(super) fn new(name: String) -> Self {
        Self {
            name,
            cells: BTreeMap::new(),
            first_row: 0,
            last_row: 0,
            first_col: 0,
            last_col: 0,
            column_widths: BTreeMap::new(),
        }
    }

    pub(super) fn add_cell(&mut self, row: u32, col: u16, cell: WritableCell) {
        if self.cells.is_empty() {
            self.first_row = row;
            self.last_row = row + 1;
            self.first_col = col;
            self.last_col = col + 1;
        } else {
            self.first_row = self.first_row.min(row);
            self.last_row = self.last_row.max(row + 1);
            self.first_col = self.first_col.min(col);
            self.last_col = self.last_col.max(col + 1);
        }

        self.cells.insert((row, col), cell);
    }

    pub(super) fn set_column_width(&mut self, col: u16, width: u16) {
        self.column_widths.insert(col, width);
    }
}

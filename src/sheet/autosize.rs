//! Column width measurement for auto-sized columns.

use super::date;
use super::format::DEFAULT_DATE_FORMAT;
use super::types::CellValue;
use std::collections::BTreeMap;

/// Widest column, in characters
pub const MAX_COLUMN_CHARS: usize = 255;

const BOLD_FACTOR: f64 = 1.1;

/// Per-column widest rendered width, in characters.
#[derive(Debug, Default)]
pub struct ColumnWidths {
    widest: Vec<f64>,
    tracking: bool,
    applied: BTreeMap<usize, u16>,
}

impl ColumnWidths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure a cell written at `col`.
    ///
    /// `number_format` is the cell's format pattern, used to render dates.
    pub fn observe(&mut self, col: usize, value: &CellValue, bold: bool, number_format: Option<&str>) {
        let mut width = rendered_chars(value, number_format) as f64;
        if bold {
            width = (width * BOLD_FACTOR * 100.0).round() / 100.0;
        }
        if self.widest.len() <= col {
            self.widest.resize(col + 1, 0.0);
        }
        if width > self.widest[col] {
            self.widest[col] = width;
        }
    }

    pub fn track_all(&mut self) {
        self.tracking = true;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Width of `col` in 1/256 character units, if any cell was measured.
    pub fn measured_units(&self, col: usize) -> Option<u16> {
        let chars = *self.widest.get(col)?;
        if chars <= 0.0 {
            return None;
        }
        Some(chars_to_units(chars.ceil() as usize))
    }

    /// Fix the width of `col` to its measured width.
    ///
    /// Returns the applied width, or `None` when the column holds no cells.
    pub fn apply(&mut self, col: usize) -> Option<u16> {
        let units = self.measured_units(col)?;
        self.applied.insert(col, units);
        Some(units)
    }

    /// Applied widths in column order.
    pub fn applied(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.applied.iter().map(|(&col, &units)| (col, units))
    }
}

/// Convert a character count to 1/256 character units with one character of
/// padding.
pub fn chars_to_units(chars: usize) -> u16 {
    let padded = (chars + 1).min(MAX_COLUMN_CHARS);
    // 255 * 256 fits in u16
    (padded * 256) as u16
}

fn rendered_chars(value: &CellValue, number_format: Option<&str>) -> usize {
    match value {
        CellValue::Bool(true) => 4,
        CellValue::Bool(false) => 5,
        CellValue::Number(n) => number_chars(*n),
        CellValue::Text(text) => text.lines().map(|line| line.chars().count()).max().unwrap_or(0),
        CellValue::Date(dt) => {
            let pattern = number_format.unwrap_or(DEFAULT_DATE_FORMAT);
            date::render(*dt, pattern).chars().count()
        },
    }
}

fn number_chars(n: f64) -> usize {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let mut buf = itoa::Buffer::new();
        buf.format(n as i64).len()
    } else {
        let mut buf = ryu::Buffer::new();
        buf.format(n).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_widest_cell_wins() {
        let mut widths = ColumnWidths::new();
        widths.observe(0, &CellValue::Text("abc".into()), false, None);
        widths.observe(0, &CellValue::Text("abcdefgh".into()), false, None);
        widths.observe(0, &CellValue::Number(7.0), false, None);
        assert_eq!(widths.measured_units(0), Some(9 * 256));
        assert_eq!(widths.measured_units(1), None);
    }

    #[test]
    fn test_bold_is_wider() {
        let mut widths = ColumnWidths::new();
        widths.observe(0, &CellValue::Text("0123456789".into()), true, None);
        assert_eq!(widths.measured_units(0), Some(12 * 256));
    }

    #[test]
    fn test_rendered_widths() {
        assert_eq!(rendered_chars(&CellValue::Bool(false), None), 5);
        assert_eq!(rendered_chars(&CellValue::Number(-120.0), None), 4);
        assert_eq!(rendered_chars(&CellValue::Number(1.5), None), 3);
        assert_eq!(rendered_chars(&CellValue::Text("ab\nlonger".into()), None), 6);

        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(rendered_chars(&CellValue::Date(dt), None), "1/15/24 9:05".len());
        assert_eq!(rendered_chars(&CellValue::Date(dt), Some("yyyy-mm-dd")), 10);
    }

    #[test]
    fn test_width_is_capped() {
        let mut widths = ColumnWidths::new();
        widths.observe(2, &CellValue::Text("w".repeat(1000)), false, None);
        assert_eq!(widths.measured_units(2), Some(255 * 256));
    }

    #[test]
    fn test_apply_records_width() {
        let mut widths = ColumnWidths::new();
        widths.observe(1, &CellValue::Text("abc".into()), false, None);
        assert_eq!(widths.apply(0), None);
        assert_eq!(widths.apply(1), Some(4 * 256));
        assert_eq!(widths.applied().collect::<Vec<_>>(), vec![(1, 4 * 256)]);
    }
}

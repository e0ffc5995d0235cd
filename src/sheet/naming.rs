//! Sheet name sanitizing and de-duplication.
//!
//! Spreadsheet applications reject sheet names that are empty, longer than
//! 31 UTF-16 units, start or end with an apostrophe, contain any of
//! `[ ] : * ? / \`, or repeat another sheet's name ignoring case.

use super::error::{Result, SheetError};
use std::collections::HashSet;

/// Longest sheet name, in UTF-16 code units
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
const FALLBACK_NAME: &str = "Sheet";

/// Check a sheet name against the rules writers enforce.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.encode_utf16().count() <= MAX_SHEET_NAME_LEN
        && !name.starts_with('\'')
        && !name.ends_with('\'')
        && !name.contains(FORBIDDEN);
    if valid {
        Ok(())
    } else {
        Err(SheetError::InvalidSheetName(name.to_string()))
    }
}

/// Hands out valid, unique sheet names for a sequence of table names.
#[derive(Debug, Default)]
pub struct SheetNamer {
    verbatim: bool,
    taken: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A namer that passes table names through untouched.
    ///
    /// The workbook then rejects names it cannot store.
    pub fn verbatim() -> Self {
        Self {
            verbatim: true,
            taken: HashSet::new(),
        }
    }

    /// Name for the sheet holding `table_name`.
    ///
    /// ```
    /// use access2excel::sheet::SheetNamer;
    ///
    /// let mut namer = SheetNamer::new();
    /// assert_eq!(namer.assign("Orders"), "Orders");
    /// assert_eq!(namer.assign("Q1/Q2"), "Q1_Q2");
    /// assert_eq!(namer.assign("ORDERS"), "ORDERS (2)");
    /// ```
    pub fn assign(&mut self, table_name: &str) -> String {
        if self.verbatim {
            self.taken.insert(table_name.to_lowercase());
            return table_name.to_string();
        }

        let base = sanitize(table_name);
        let mut name = base.clone();
        let mut suffix = 2usize;
        while self.taken.contains(&name.to_lowercase()) {
            let tail = format!(" ({suffix})");
            let room = MAX_SHEET_NAME_LEN - tail.len();
            name = format!("{}{}", truncate_utf16(&base, room), tail);
            suffix += 1;
        }

        if name != table_name {
            tracing::warn!(table = table_name, sheet = %name, "renamed sheet");
        }
        self.taken.insert(name.to_lowercase());
        name
    }
}

fn sanitize(table_name: &str) -> String {
    let replaced: String = table_name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = truncate_utf16(replaced.trim_matches('\''), MAX_SHEET_NAME_LEN).trim_end_matches('\'');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Longest prefix of `s` that fits in `units` UTF-16 code units.
fn truncate_utf16(s: &str, units: usize) -> &str {
    let mut used = 0;
    for (offset, c) in s.char_indices() {
        used += c.len_utf16();
        if used > units {
            return &s[..offset];
        }
    }
    s
}

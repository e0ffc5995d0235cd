//! Number formats shared by both spreadsheet writers.

/// Date pattern used when none is configured (built-in format 22)
pub const DEFAULT_DATE_FORMAT: &str = "m/d/yy h:mm";

/// First id available to custom number formats
pub const FIRST_CUSTOM_NUMBER_FORMAT: u16 = 164;

/// Built-in number format codes, indexed by id.
///
/// Ids 0x17..=0x24 are locale dependent and left empty so they never match.
pub(crate) const BUILTIN_NUMBER_FORMATS: [&str; 50] = [
    "General",                              // 0x00
    "0",                                    // 0x01
    "0.00",                                 // 0x02
    "#,##0",                                // 0x03
    "#,##0.00",                             // 0x04
    "\"$\"#,##0_);(\"$\"#,##0)",            // 0x05
    "\"$\"#,##0_);[Red](\"$\"#,##0)",       // 0x06
    "\"$\"#,##0.00_);(\"$\"#,##0.00)",      // 0x07
    "\"$\"#,##0.00_);[Red](\"$\"#,##0.00)", // 0x08
    "0%",                                   // 0x09
    "0.00%",                                // 0x0A
    "0.00E+00",                             // 0x0B
    "# ?/?",                                // 0x0C
    "# ??/??",                              // 0x0D
    "m/d/yy",                               // 0x0E
    "d-mmm-yy",                             // 0x0F
    "d-mmm",                                // 0x10
    "mmm-yy",                               // 0x11
    "h:mm AM/PM",                           // 0x12
    "h:mm:ss AM/PM",                        // 0x13
    "h:mm",                                 // 0x14
    "h:mm:ss",                              // 0x15
    "m/d/yy h:mm",                          // 0x16
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "",
    "#,##0_);(#,##0)",            // 0x25
    "#,##0_);[Red](#,##0)",       // 0x26
    "#,##0.00_);(#,##0.00)",      // 0x27
    "#,##0.00_);[Red](#,##0.00)", // 0x28
    "_(* #,##0_);_(* (#,##0);_(* \"-\"_);_(@_)",
    "_(\"$\"* #,##0_);_(\"$\"* (#,##0);_(\"$\"* \"-\"_);_(@_)",
    "_(* #,##0.00_);_(* (#,##0.00);_(* \"-\"??_);_(@_)",
    "_(\"$\"* #,##0.00_);_(\"$\"* (#,##0.00);_(\"$\"* \"-\"??_);_(@_)",
    "mm:ss",     // 0x2D
    "[h]:mm:ss", // 0x2E
    "mm:ss.0",   // 0x2F
    "##0.0E+0",  // 0x30
    "@",         // 0x31
];

/// Id of a built-in pattern, so it is not emitted as a custom format.
pub fn builtin_number_format_index(pattern: &str) -> Option<u16> {
    if pattern.is_empty() {
        return None;
    }
    BUILTIN_NUMBER_FORMATS
        .iter()
        .position(|&p| p == pattern)
        .map(|idx| idx as u16)
}

/// Allocates ids for number format patterns the way Excel numbers them.
#[derive(Debug, Default)]
pub struct NumberFormatTable {
    custom: Vec<(u16, String)>,
}

impl NumberFormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `pattern`, registering a custom format if needed.
    pub fn register(&mut self, pattern: &str) -> u16 {
        let normalized = if pattern.eq_ignore_ascii_case("TEXT") {
            "@"
        } else {
            pattern
        };
        if let Some(id) = builtin_number_format_index(normalized) {
            return id;
        }
        if let Some((id, _)) = self.custom.iter().find(|(_, p)| p == normalized) {
            return *id;
        }

        let id = FIRST_CUSTOM_NUMBER_FORMAT + self.custom.len() as u16;
        self.custom.push((id, normalized.to_string()));
        id
    }

    /// Custom formats in id order.
    pub fn custom(&self) -> &[(u16, String)] {
        &self.custom
    }
}

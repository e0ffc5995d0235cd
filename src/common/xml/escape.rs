use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::fmt::Write as FmtWrite;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| AhoCorasick::new(["&", "<", ">", "\"", "'"]).ok());

const XML_REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use access2excel::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    match XML_ESCAPER.as_ref() {
        Some(escaper) => escaper.replace_all(s, &XML_REPLACEMENTS),
        None => s
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    }
}

/// Escape cell text for SpreadsheetML.
///
/// On top of [`escape_xml`], control characters that XML 1.0 cannot carry are
/// written in Excel's `_xHHHH_` notation.
///
/// ```
/// use access2excel::common::xml::escape_xml_text;
/// assert_eq!(escape_xml_text("a\u{1}b"), "a_x0001_b");
/// assert_eq!(escape_xml_text("tab\tok"), "tab\tok");
/// ```
pub fn escape_xml_text(s: &str) -> String {
    let escaped = escape_xml(s);
    if !escaped.chars().any(is_xml_illegal) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 16);
    for ch in escaped.chars() {
        if is_xml_illegal(ch) {
            // Writing into a String cannot fail.
            let _ = write!(out, "_x{:04X}_", ch as u32);
        } else {
            out.push(ch);
        }
    }
    out
}

#[inline]
fn is_xml_illegal(ch: char) -> bool {
    matches!(ch, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_entities() {
        assert_eq!(escape_xml("&<>\"'"), "&amp;&lt;&gt;&quot;&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_text_controls() {
        assert_eq!(escape_xml_text("\u{0}&\u{1F}"), "_x0000_&amp;_x001F_");
        assert_eq!(escape_xml_text("line\r\nbreak"), "line\r\nbreak");
    }
}

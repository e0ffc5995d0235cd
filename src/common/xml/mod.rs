//! XML text helpers used by the SpreadsheetML writer.

mod escape;

pub use escape::{escape_xml, escape_xml_text};

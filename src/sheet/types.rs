//! Values and handles passed to the spreadsheet writers.

use crate::common::Error;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    /// Excel 97-2003 binary workbook
    Xls,
    /// Office Open XML workbook
    #[default]
    Xlsx,
}

impl OutputFormat {
    /// Lowercase file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xls => "xls",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Whether rows are flushed while the workbook is being written.
    pub fn is_streaming(self) -> bool {
        matches!(self, OutputFormat::Xlsx)
    }

    /// Last usable row index plus one.
    pub fn max_rows(self) -> usize {
        match self {
            OutputFormat::Xls => 65_536,
            OutputFormat::Xlsx => 1_048_576,
        }
    }

    /// Last usable column index plus one.
    pub fn max_columns(self) -> usize {
        match self {
            OutputFormat::Xls => 256,
            OutputFormat::Xlsx => 16_384,
        }
    }

    /// Longest text a cell may hold, in characters.
    pub fn max_text_len(self) -> usize {
        32_767
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    /// Case-insensitive `XLS` or `XLSX`.
    ///
    /// ```
    /// use access2excel::sheet::OutputFormat;
    ///
    /// assert_eq!("xls".parse::<OutputFormat>().unwrap(), OutputFormat::Xls);
    /// assert!("csv".parse::<OutputFormat>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("XLS") {
            Ok(OutputFormat::Xls)
        } else if s.eq_ignore_ascii_case("XLSX") {
            Ok(OutputFormat::Xlsx)
        } else {
            Err(Error::UnsupportedFormat(s.to_string()))
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Xls => f.write_str("XLS"),
            OutputFormat::Xlsx => f.write_str("XLSX"),
        }
    }
}

/// A value written into a single cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Stored as a serial number; needs a date style to display as a date
    Date(NaiveDateTime),
}

impl CellValue {
    /// Numbers a spreadsheet cannot store (NaN, infinities) become text.
    pub fn into_storable(self) -> Self {
        match self {
            CellValue::Number(n) if n.is_nan() => CellValue::Text("NaN".to_string()),
            CellValue::Number(n) if n.is_infinite() => CellValue::Text(
                if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string(),
            ),
            other => other,
        }
    }
}

/// Cell formatting the converter asks for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub bold: bool,
    pub number_format: Option<String>,
}

impl CellStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            number_format: None,
        }
    }

    pub fn with_number_format(pattern: impl Into<String>) -> Self {
        Self {
            bold: false,
            number_format: Some(pattern.into()),
        }
    }
}

/// Handle to a style registered with a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleId(pub(crate) usize);

impl StyleId {
    pub fn index(self) -> usize {
        self.0
    }
}

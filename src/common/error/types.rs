//! Top-level error kinds reported by the converter.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input database is missing, corrupt, or unreadable
    #[error("{0}")]
    Open(String),

    /// A path resolved outside of the permitted root directory
    #[error("Path {} is outside of {}", path.display(), root.display())]
    Security { path: PathBuf, root: PathBuf },

    /// Requested output format is not recognized
    #[error("Invalid format: {0}. Use XLS or XLSX.")]
    UnsupportedFormat(String),

    /// Failure while iterating tables/rows or persisting the workbook
    #[error("{0}")]
    Conversion(String),

    /// Embedded OLE header could not be decoded
    ///
    /// Never surfaced by the converter: the header parser downgrades it to a
    /// sentinel name.
    #[error("{0}")]
    OleDecode(String),

    /// Options file could not be read or parsed
    #[error("{0}")]
    Config(String),
}

impl Error {
    /// Short name of the error kind, as printed in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Open(_) => "OpenError",
            Error::Security { .. } => "SecurityError",
            Error::UnsupportedFormat(_) => "UnsupportedFormatError",
            Error::Conversion(_) => "ConversionError",
            Error::OleDecode(_) => "OleDecodeError",
            Error::Config(_) => "ConfigError",
        }
    }

    /// Format the error as `Error: <kind>[ - <message>]`.
    ///
    /// ```
    /// use access2excel::Error;
    ///
    /// let err = Error::Conversion("disk full".to_string());
    /// assert_eq!(err.report_line(), "Error: ConversionError - disk full");
    /// assert_eq!(Error::Open(String::new()).report_line(), "Error: OpenError");
    /// ```
    pub fn report_line(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            format!("Error: {}", self.kind())
        } else {
            format!("Error: {} - {}", self.kind(), message)
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

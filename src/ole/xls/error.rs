//! Error types for XLS generation

use std::fmt;

/// Result type alias for XLS operations
pub type XlsResult<T> = Result<T, XlsError>;

/// Errors raised while building a BIFF8 workbook stream
#[derive(Debug)]
pub enum XlsError {
    /// I/O error
    Io(std::io::Error),
    /// Compound file container error
    Cfb(crate::ole::OleError),
    /// A record payload does not fit its length field
    RecordTooLarge {
        /// Record type
        record_type: u16,
        /// Payload length in bytes
        len: usize,
    },
    /// Worksheet not found
    WorksheetNotFound(usize),
    /// Cell format index was never registered
    InvalidFormat(u16),
    /// Invalid data
    InvalidData(String),
}

impl fmt::Display for XlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XlsError::Io(e) => write!(f, "I/O error: {}", e),
            XlsError::Cfb(e) => write!(f, "CFB error: {}", e),
            XlsError::RecordTooLarge { record_type, len } => {
                write!(f, "Record 0x{:04X} payload of {} bytes is too large", record_type, len)
            },
            XlsError::WorksheetNotFound(index) => {
                write!(f, "Worksheet {} not found", index)
            },
            XlsError::InvalidFormat(code) => {
                write!(f, "Invalid format code: {}", code)
            },
            XlsError::InvalidData(msg) => {
                write!(f, "Invalid data: {}", msg)
            },
        }
    }
}

impl std::error::Error for XlsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XlsError::Io(e) => Some(e),
            XlsError::Cfb(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XlsError {
    fn from(err: std::io::Error) -> Self {
        XlsError::Io(err)
    }
}

impl From<crate::ole::OleError> for XlsError {
    fn from(err: crate::ole::OleError) -> Self {
        XlsError::Cfb(err)
    }
}

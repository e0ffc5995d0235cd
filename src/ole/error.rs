//! Errors raised while assembling OLE2 compound files.

use std::io;

/// OLE compound file error
#[derive(Debug)]
pub enum OleError {
    /// I/O failure while writing sectors
    Io(io::Error),
    /// Caller supplied data the container cannot hold
    InvalidData(String),
    /// Internal allocation tables are inconsistent
    CorruptedFile(String),
}

impl From<io::Error> for OleError {
    fn from(err: io::Error) -> Self {
        OleError::Io(err)
    }
}

impl std::fmt::Display for OleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OleError::Io(e) => write!(f, "IO error: {}", e),
            OleError::InvalidData(s) => write!(f, "Invalid data: {}", s),
            OleError::CorruptedFile(s) => write!(f, "Corrupted file: {}", s),
        }
    }
}

impl std::error::Error for OleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OleError::Io(e) => Some(e),
            _ => None,
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Database reader error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Table '{table}' ran out of rows after {read} of {expected}")]
    CursorExhausted {
        table: String,
        expected: usize,
        read: usize,
    },

    #[error("Row {row} of table '{table}' has {found} values, expected {expected}")]
    RowWidth {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{program} failed: {reason}")]
    Command { program: String, reason: String },

    #[error("Invalid {what}: {reason}")]
    Parse { what: String, reason: String },

    #[error("Database is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

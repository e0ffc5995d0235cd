//! Errors raised by the spreadsheet writers.

use crate::ole::xls::XlsError;
use crate::sheet::types::OutputFormat;
use thiserror::Error;

/// Spreadsheet writer error
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLS error: {0}")]
    Xls(#[from] XlsError),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid sheet name '{0}'")]
    InvalidSheetName(String),

    #[error("The workbook already contains a sheet named '{0}'")]
    DuplicateSheet(String),

    #[error("No sheet has been created")]
    NoActiveSheet,

    #[error("No row has been created")]
    NoActiveRow,

    #[error("Row {row} must come after row {last}")]
    RowOutOfOrder { row: usize, last: usize },

    #[error("{what} {value} is beyond the {format} limit of {limit}")]
    LimitExceeded {
        format: OutputFormat,
        what: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("Column {0} was not tracked for auto-sizing")]
    ColumnNotTracked(usize),

    #[error("Unknown cell style {0}")]
    UnknownStyle(usize),
}

pub type Result<T> = std::result::Result<T, SheetError>;

//! Error conversion implementations.
//!
//! Failures raised while tables are being converted or the workbook is being
//! persisted all surface as [`Error::Conversion`]. Failures to open the input
//! database are mapped explicitly by the converter and never go through here.

use super::types::Error;

impl From<crate::database::DatabaseError> for Error {
    fn from(err: crate::database::DatabaseError) -> Self {
        Error::Conversion(err.to_string())
    }
}

impl From<crate::sheet::SheetError> for Error {
    fn from(err: crate::sheet::SheetError) -> Self {
        Error::Conversion(err.to_string())
    }
}

impl From<crate::convert::mapper::MapError> for Error {
    fn from(err: crate::convert::mapper::MapError) -> Self {
        Error::Conversion(err.to_string())
    }
}

impl From<crate::ole::OleError> for Error {
    fn from(err: crate::ole::OleError) -> Self {
        Error::Conversion(err.to_string())
    }
}

impl From<crate::ole::xls::XlsError> for Error {
    fn from(err: crate::ole::xls::XlsError) -> Self {
        Error::Conversion(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Conversion(err.to_string())
    }
}

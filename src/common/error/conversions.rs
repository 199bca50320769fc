//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! packaging and OOXML error types to the unified Error type, plus the
//! context-specific constructors used where the same low-level fault means
//! different things (a broken spreadsheet versus a broken Word package).

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        Error::from_opc_error(err)
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Opc(e) => Error::from_opc_error(e),
            other => Error::DocumentFormat(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::DocumentFormat(err.to_string())
    }
}

impl Error {
    pub(crate) fn from_opc_error(err: OpcError) -> Self {
        match err {
            OpcError::Io(e) => Error::Io(e),
            other => Error::DocumentFormat(other.to_string()),
        }
    }

    /// Wrap a fault raised while reading the items spreadsheet.
    pub(crate) fn spreadsheet(err: impl std::fmt::Display) -> Self {
        Error::Parse(format!("Could not read spreadsheet: {}", err))
    }

    /// Wrap a fault raised while rewriting or serializing the document.
    pub(crate) fn processing(err: impl std::fmt::Display) -> Self {
        Error::DocumentProcessing(err.to_string())
    }
}

//! Unified error types for the edital crate.
//!
//! Each variant corresponds to one failure class a caller can act on: the
//! HTTP layer maps them onto status codes, the pipeline uses them to stop a
//! request without producing partial output.
use thiserror::Error;

/// Main error type for edital operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An uploaded file does not carry the expected extension
    #[error("{0}")]
    FileType(String),

    /// Required spreadsheet columns are absent, in required-column order
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// Spreadsheet bytes do not parse as a workbook
    #[error("{0}")]
    Parse(String),

    /// A line item cannot be apportioned
    #[error("Invalid item {item}: {reason}")]
    InvalidItem { item: String, reason: String },

    /// Document bytes are not a Word package
    #[error("Invalid document format: {0}")]
    DocumentFormat(String),

    /// Rewriting or serializing the document failed
    #[error("Error processing documents: {0}")]
    DocumentProcessing(String),

    /// The selected-tables payload is not a list of positions
    #[error("Invalid table selection: {0}")]
    InvalidSelection(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the failure was caused by the request's content rather than
    /// by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::FileType(_)
                | Error::MissingColumns { .. }
                | Error::Parse(_)
                | Error::InvalidItem { .. }
                | Error::InvalidSelection(_)
        )
    }
}

/// Result type for edital operations.
pub type Result<T> = std::result::Result<T, Error>;

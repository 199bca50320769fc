//! Errors raised while opening an OPC package.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpcError {
    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    #[error("Content type not found for partname: {0}")]
    ContentTypeNotFound(String),

    #[error("Invalid relationship: {0}")]
    InvalidRelationship(String),

    /// Malformed `[Content_Types].xml` or `.rels` markup, attributes included.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The archive inflates past the decompressed size limit.
    #[error("Package exceeds {limit} bytes once decompressed (at {name})")]
    TooLarge { name: String, limit: u64 },

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OpcError {
    fn from(err: quick_xml::Error) -> Self {
        OpcError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OpcError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OpcError::Xml(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpcError>;

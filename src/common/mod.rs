//! Common types and utilities shared across the packaging, document and
//! spreadsheet layers.

// Submodule declarations
pub mod error;
pub mod number;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use number::{format_number, parse_number};
pub use xml::{escape_xml, escape_xml_into};

//! Open Packaging Conventions (OPC) implementation.
//!
//! The subset of OPC needed to open a Word or Excel package, follow its
//! relationships to the parts that matter, swap part contents and write the
//! package back out:
//!
//! - Package structure (parts, relationships)
//! - Content type lookup
//! - ZIP-based physical packaging

pub mod constants;
pub mod content_types;
pub mod error;
pub mod package;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

pub use content_types::ContentTypeMap;
pub use error::OpcError;
pub use package::{OpcPackage, PackagePart};
pub use packuri::PackURI;
pub use rel::{Relationship, Relationships};

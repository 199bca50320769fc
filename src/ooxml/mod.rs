//! Office Open XML (OOXML) format implementation.
//!
//! The implementation is based on the Open Packaging Conventions (OPC).
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **OPC Layer** (`opc`): Low-level package handling (ZIP, parts, relationships)
//! 2. **Shared Utilities** (`error`): Error type used across formats
//! 3. **Format-Specific Modules**:
//!    - `docx`: Word documents (body tables, styles, table writer)
//!    - `xlsx`: Excel spreadsheets (worksheet cell values)
//!
//! # Example: Listing the tables of a Word document
//!
//! ```rust,no_run
//! use edital::ooxml::docx::Package;
//!
//! let data = std::fs::read("document.docx")?;
//! let pkg = Package::from_bytes(&data)?;
//! println!("Document contains {} tables", pkg.document()?.table_count()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;
pub mod xlsx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};

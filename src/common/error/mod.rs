//! Unified error types for the edital crate.
//!
//! This module provides a single error type that encompasses packaging,
//! document, spreadsheet and procurement-rule failures, presenting a
//! consistent API to the processing pipeline and the HTTP layer.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};

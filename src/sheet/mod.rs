//! Format-independent spreadsheet types.
//!
//! The `.xlsx` reader in [`crate::ooxml::xlsx`] produces rows of
//! [`CellValue`]s; the procurement layer consumes them without knowing where
//! they came from.

pub mod types;

pub use types::CellValue;

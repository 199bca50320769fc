//! Edital - procurement notice tables from item spreadsheets
//!
//! This library rewrites the items table of a Word terms-of-reference
//! document from an Excel spreadsheet of line items, applying the ME/EPP
//! quota of Lei Complementar nº 123/2006 to each item on the way.
//!
//! # Features
//!
//! - **Table previews**: list the body tables of a .docx with their first rows
//! - **Spreadsheet validation**: check an .xlsx for the required item columns
//! - **Quota classification**: reserve items up to R$ 80.000 for micro and
//!   small enterprises, split larger ones into a reserved share and open
//!   competition
//! - **Table replacement**: swap the selected tables for one rendered table,
//!   leaving every other part of the package untouched
//! - **HTTP service**: the same operations over multipart uploads
//!
//! # Example - Classifying and replacing tables
//!
//! ```no_run
//! use edital::processor::{Processor, TableSelection};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = std::fs::read("termo_referencia.docx")?;
//! let spreadsheet = std::fs::read("itens.xlsx")?;
//!
//! let processor = Processor::default();
//! for table in processor.identify_tables(&document)? {
//!     println!("{}:\n{}", table.title, table.preview);
//! }
//!
//! let selection = TableSelection::from_json("[0]")?;
//! let output = processor.process_documents(&document, &spreadsheet, &selection)?;
//! std::fs::write("termo_referencia_modificado.docx", output)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Applying the quota rule
//!
//! ```
//! use edital::procurement::{Classification, Item, QuotaRule};
//! use edital::sheet::CellValue;
//!
//! let item = Item {
//!     number: CellValue::Int(1),
//!     description: "Resma de papel A4".to_string(),
//!     supply_unit: CellValue::String("Resma".to_string()),
//!     quantity: 10.0,
//!     estimated_value: 100_000.0,
//!     extras: Vec::new(),
//! };
//!
//! let rows: Vec<_> = QuotaRule::default().apportion(&item)?.into_rows().collect();
//! assert_eq!(rows[0].classification, Classification::OpenCompetition);
//! assert_eq!(rows[0].item.estimated_value, 80_000.0);
//! assert_eq!(rows[1].classification, Classification::ReservedQuota);
//! assert_eq!(rows[1].item.quantity, 2.0);
//! # Ok::<(), edital::common::Error>(())
//! ```

/// Shared error type, number formatting and XML helpers
pub mod common;

/// OOXML (Office Open XML) packages
///
/// This module provides the packaging layer and the Word and Excel parts
/// needed to read tables and items and to write a table back.
pub mod ooxml;

/// Spreadsheet cell values
pub mod sheet;

/// Procurement items, column schema and the quota rule
pub mod procurement;

/// Table previews, table replacement and the end-to-end pipeline
pub mod processor;

/// HTTP routes
pub mod api;

/// Server configuration
pub mod config;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use processor::{Processor, TablePreview, TableSelection};

#[cfg(test)]
pub(crate) mod testing;

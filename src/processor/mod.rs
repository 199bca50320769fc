//! Request-level processing of uploaded documents.
//!
//! [`extractor`] previews a Word document's tables, [`assembler`] swaps the
//! selected ones for a rendered items table, and [`pipeline`] ties both to
//! spreadsheet reading and item classification.

pub mod assembler;
pub mod extractor;
pub mod pipeline;

pub use assembler::{TableSelection, assemble};
pub use extractor::{PREVIEW_ROWS, TablePreview, extract};
pub use pipeline::{Processor, UNREADABLE_SPREADSHEET};

//! Writer components for DOCX fragments.

pub mod table;

pub use table::{MutableCell, MutableRow, MutableTable};

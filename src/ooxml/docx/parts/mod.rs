/// Part implementations for Word documents.
///
/// Only the main document part needs a typed wrapper; other parts are read
/// as plain blobs from the package.
pub mod document_part;

pub use document_part::DocumentPart;

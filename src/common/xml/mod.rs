//! XML helpers shared by the Word and spreadsheet readers and the Word writer.

mod escape;
mod text;

pub use escape::{escape_xml, escape_xml_into};
pub use text::{push_entity, push_text};

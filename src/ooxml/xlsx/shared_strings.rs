//! Shared strings table for Excel files.
//!
//! Excel stores most cell text once in `xl/sharedStrings.xml` and refers to
//! it by index from the worksheets.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::common::xml::{push_entity, push_text};
use crate::ooxml::error::Result;

/// Shared strings table.
#[derive(Debug, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from already decoded strings.
    pub fn from_strings(strings: Vec<String>) -> Self {
        Self { strings }
    }

    /// Parse shared strings from `xl/sharedStrings.xml` content.
    ///
    /// Each `<si>` contributes one string: its plain `<t>` text, or the
    /// concatenated `<t>` texts of its rich-text runs. Phonetic hints
    /// (`<rPh>`) are not part of the string.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut strings = Vec::new();
        let mut current: Option<String> = None;
        let mut in_text = false;
        let mut in_phonetic = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"si" => current = Some(String::new()),
                    b"rPh" => in_phonetic = true,
                    b"t" if current.is_some() && !in_phonetic => in_text = true,
                    _ => {},
                },
                Event::Empty(ref e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                },
                Event::Text(ref e) if in_text => {
                    if let Some(s) = current.as_mut() {
                        push_text(s, e)?;
                    }
                },
                Event::GeneralRef(ref e) if in_text => {
                    if let Some(s) = current.as_mut() {
                        push_entity(s, e)?;
                    }
                },
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"si" => {
                        if let Some(s) = current.take() {
                            strings.push(s);
                        }
                    },
                    b"rPh" => in_phonetic = false,
                    b"t" => in_text = false,
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by its index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the number of strings in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

//! Content type discovery for OPC parts.
//!
//! Implements the OPC content type lookup using the Default and Override
//! elements of `[Content_Types].xml`.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    /// Maps lowercase file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps lowercase partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from `[Content_Types].xml`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let key_attr: &[u8] = match e.local_name().as_ref() {
                        b"Default" => b"Extension",
                        b"Override" => b"PartName",
                        _ => {
                            buf.clear();
                            continue;
                        },
                    };

                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == key_attr {
                            key = Some(attr.unescape_value()?.to_lowercase());
                        } else if attr.key.as_ref() == b"ContentType" {
                            content_type = Some(attr.unescape_value()?.to_string());
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        if key_attr == b"Extension" {
                            map.defaults.insert(key, ct);
                        } else {
                            map.overrides.insert(key, ct);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::Xml(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Get the content type for a partname.
    ///
    /// First checks for an override, then falls back to the default
    /// based on file extension. Partname comparison is case-insensitive.
    pub fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_lowercase()) {
            return Ok(ct);
        }

        if let Some(ct) = self.defaults.get(&pack_uri.ext().to_lowercase()) {
            return Ok(ct);
        }

        Err(OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

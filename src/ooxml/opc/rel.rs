//! Relationship-related objects for OPC packages.
//!
//! This module provides types for reading the relationships between parts in
//! an OPC package, as declared by the package's `.rels` parts.
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A single relationship from a source part to a target.
///
/// Identified by an rId. Can be either internal (pointing to another part)
/// or external (pointing to an external URL).
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(
                "Cannot get target_partname for external relationship".to_string(),
            ));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Collection of relationships from a single source, in declaration order.
#[derive(Debug, Default)]
pub struct Relationships {
    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Parse a `.rels` part.
    ///
    /// `base_uri` is the directory of the source part, used to resolve
    /// relative targets.
    pub fn from_xml(rels_xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = SmallVec::new();
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut r_id = None;
                        let mut reltype = None;
                        let mut target_ref = None;
                        let mut is_external = false;

                        for attr in e.attributes() {
                            let attr = attr?;
                            match attr.key.as_ref() {
                                b"Id" => r_id = Some(attr.unescape_value()?.to_string()),
                                b"Type" => reltype = Some(attr.unescape_value()?.to_string()),
                                b"Target" => target_ref = Some(attr.unescape_value()?.to_string()),
                                b"TargetMode" => {
                                    is_external =
                                        attr.unescape_value()? == target_mode::EXTERNAL;
                                },
                                _ => {},
                            }
                        }

                        match (r_id, reltype, target_ref) {
                            (Some(r_id), Some(reltype), Some(target_ref)) => {
                                rels.push(Relationship::new(
                                    r_id,
                                    reltype,
                                    target_ref,
                                    base_uri.to_string(),
                                    is_external,
                                ));
                            },
                            _ => {
                                return Err(OpcError::InvalidRelationship(
                                    "Relationship element missing Id, Type or Target".to_string(),
                                ));
                            },
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::Xml(format!(
                        "Relationships parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { rels })
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get the first internal relationship whose type is one of `reltypes`.
    pub fn first_of_type(&self, reltypes: &[&str]) -> Option<&Relationship> {
        self.rels
            .iter()
            .find(|rel| !rel.is_external() && reltypes.contains(&rel.reltype()))
    }

    /// Iterate over the relationships in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if there are no relationships.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }
}

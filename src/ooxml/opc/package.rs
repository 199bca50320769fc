//! Objects that implement reading and writing OPC packages.
//!
//! This module provides the main OpcPackage type, which represents an Open Packaging
//! Convention package in memory. Every ZIP member is kept as an owned blob in
//! archive order, so a package can be read, have selected parts replaced, and be
//! serialized again without disturbing the parts it does not understand.
use std::collections::HashMap;

use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::content_types::ContentTypeMap;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::rel::Relationships;

/// A single member of the package: its partname and raw bytes.
#[derive(Debug, Clone)]
pub struct PackagePart {
    uri: PackURI,
    blob: Vec<u8>,
}

impl PackagePart {
    /// Get the partname of this part.
    #[inline]
    pub fn uri(&self) -> &PackURI {
        &self.uri
    }

    /// Get the binary content of this part.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }
}

/// Main API class for working with OPC packages.
pub struct OpcPackage {
    /// All members, in archive order
    parts: Vec<PackagePart>,

    /// Lowercase partname to index into `parts`
    index: HashMap<String, usize>,

    /// Parsed `[Content_Types].xml`
    content_types: ContentTypeMap,
}

impl OpcPackage {
    /// Load an OPC package from the bytes of a ZIP archive.
    ///
    /// Fails if the bytes are not a ZIP archive or the archive has no
    /// `[Content_Types].xml` part.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut phys_reader = PhysPkgReader::new(data)?;
        let members = phys_reader.read_all()?;

        let mut parts = Vec::with_capacity(members.len());
        let mut index = HashMap::with_capacity(members.len());
        for (uri, blob) in members {
            index.insert(uri.as_str().to_lowercase(), parts.len());
            parts.push(PackagePart { uri, blob });
        }

        let mut package = Self {
            parts,
            index,
            content_types: ContentTypeMap::default(),
        };

        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        package.content_types = ContentTypeMap::from_xml(package.part(&content_types_uri)?)?;

        Ok(package)
    }

    /// Get the binary content of a part.
    ///
    /// Partname lookup is case-insensitive, as OPC requires.
    pub fn part(&self, uri: &PackURI) -> Result<&[u8]> {
        self.index
            .get(&uri.as_str().to_lowercase())
            .map(|&i| self.parts[i].blob())
            .ok_or_else(|| OpcError::PartNotFound(uri.to_string()))
    }

    /// Check if a part exists in the package.
    pub fn contains(&self, uri: &PackURI) -> bool {
        self.index.contains_key(&uri.as_str().to_lowercase())
    }

    /// Get the content type of a part.
    pub fn content_type(&self, uri: &PackURI) -> Result<&str> {
        self.content_types.get(uri)
    }

    /// Get the relationships declared by a source part.
    ///
    /// Pass the package pseudo-partname "/" for package-level relationships.
    /// A source without a `.rels` part has no relationships.
    pub fn relationships(&self, source: &PackURI) -> Result<Relationships> {
        let rels_uri = source.rels_uri().map_err(OpcError::InvalidPackUri)?;
        match self.part(&rels_uri) {
            Ok(xml) => Relationships::from_xml(xml, source.base_uri()),
            Err(OpcError::PartNotFound(_)) => Ok(Relationships::default()),
            Err(e) => Err(e),
        }
    }

    /// Resolve the first internal relationship of one of `reltypes` from `source`.
    pub fn related_partname(&self, source: &PackURI, reltypes: &[&str]) -> Result<Option<PackURI>> {
        let rels = self.relationships(source)?;
        rels.first_of_type(reltypes)
            .map(|rel| rel.target_partname())
            .transpose()
    }

    /// Get the partname of the main document part (document.xml, workbook.xml, ...).
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let partname = self
            .related_partname(&package_uri, &[rt::OFFICE_DOCUMENT, rt::OFFICE_DOCUMENT_STRICT])?
            .ok_or_else(|| {
                OpcError::RelationshipNotFound("package has no officeDocument relationship".into())
            })?;

        if !self.contains(&partname) {
            return Err(OpcError::PartNotFound(partname.to_string()));
        }
        Ok(partname)
    }

    /// Replace the content of an existing part.
    pub fn replace_part(&mut self, uri: &PackURI, blob: Vec<u8>) -> Result<()> {
        let &i = self
            .index
            .get(&uri.as_str().to_lowercase())
            .ok_or_else(|| OpcError::PartNotFound(uri.to_string()))?;
        self.parts[i].blob = blob;
        Ok(())
    }

    /// Iterate over the parts in archive order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &PackagePart> {
        self.parts.iter()
    }

    /// Serialize the package to ZIP bytes, preserving member order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();
        for part in &self.parts {
            writer.write(part.uri(), part.blob())?;
        }
        writer.finish()
    }
}

impl std::fmt::Debug for OpcPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpcPackage")
            .field("parts", &self.parts.len())
            .finish()
    }
}

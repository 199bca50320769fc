//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading and writing of OPC packages from
//! and to ZIP archives. Reading decompresses every member once, in archive
//! order; the package layer owns the blobs from then on.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Decompressed bytes a package may expand to, summed over its members.
pub const DEFAULT_UNPACKED_LIMIT: u64 = 256 * 1024 * 1024;

/// Largest buffer reserved up front from a member's declared size.
const CAPACITY_HINT_LIMIT: u64 = 8 * 1024 * 1024;

/// Physical package reader over an in-memory ZIP archive.
pub struct PhysPkgReader<'data> {
    archive: ZipArchive<Cursor<&'data [u8]>>,
    unpacked_limit: u64,
}

impl<'data> PhysPkgReader<'data> {
    /// Create a new PhysPkgReader from a byte slice.
    ///
    /// Fails if the bytes are not a ZIP archive.
    pub fn new(data: &'data [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive,
            unpacked_limit: DEFAULT_UNPACKED_LIMIT,
        })
    }

    /// Set how many decompressed bytes [`read_all`](Self::read_all) accepts.
    pub fn with_unpacked_limit(mut self, limit: u64) -> Self {
        self.unpacked_limit = limit;
        self
    }

    /// Decompress every file member, preserving archive order.
    ///
    /// Directory entries are skipped. Sizes declared in the archive are only
    /// a hint; the inflated bytes are what count against the limit.
    pub fn read_all(&mut self) -> Result<Vec<(PackURI, Vec<u8>)>> {
        let mut budget = self.unpacked_limit;
        let mut members = Vec::with_capacity(self.archive.len());
        for index in 0..self.archive.len() {
            let mut file = self.archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let hint = file.size().min(budget).min(CAPACITY_HINT_LIMIT);
            let mut blob = Vec::with_capacity(hint as usize);
            (&mut file).take(budget.saturating_add(1)).read_to_end(&mut blob)?;
            if blob.len() as u64 > budget {
                return Err(OpcError::TooLarge {
                    name,
                    limit: self.unpacked_limit,
                });
            }
            budget -= blob.len() as u64;
            members.push((PackURI::from_membername(&name), blob));
        }
        Ok(members)
    }
}

/// Physical package writer for creating OPC packages.
///
/// Handles the low-level writing of parts to an in-memory ZIP archive.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Deflated)
    }

    /// Write a part to the package without compression (stored).
    pub fn write_stored(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.write_with(pack_uri, blob, CompressionMethod::Stored)
    }

    fn write_with(
        &mut self,
        pack_uri: &PackURI,
        blob: &[u8],
        method: CompressionMethod,
    ) -> Result<()> {
        let options = SimpleFileOptions::default().compression_method(method);
        self.archive.start_file(pack_uri.membername(), options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

//! Table previews for choosing which tables to replace.

use serde::Serialize;
use tracing::debug;

use crate::common::Result;
use crate::ooxml::docx::{Package, Table};

/// Number of leading rows shown in a preview.
pub const PREVIEW_ROWS: usize = 5;

/// A summary of one body table, as listed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePreview {
    /// 0-based position of the table in the document body
    pub id: usize,
    pub title: String,
    /// The first rows, cells joined with `" | "`, rows with newlines
    pub preview: String,
    pub selected: bool,
}

/// List the body tables of a Word document with a short text preview of each.
///
/// Fails with [`Error::DocumentFormat`](crate::common::Error::DocumentFormat)
/// if the bytes are not a Word package.
pub fn extract(document: &[u8]) -> Result<Vec<TablePreview>> {
    let package = Package::from_bytes(document)?;
    let tables = package.document()?.tables()?;

    let previews = tables
        .iter()
        .enumerate()
        .map(|(id, table)| {
            Ok(TablePreview {
                id,
                title: format!("Table {}", id + 1),
                preview: preview_text(table)?,
                selected: false,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(tables = previews.len(), "extracted table previews");
    Ok(previews)
}

/// Render the leading rows of a table. Empty cells are left out of a row.
fn preview_text(table: &Table) -> Result<String> {
    let rows = table.cell_texts()?;
    let lines: Vec<String> = rows
        .iter()
        .take(PREVIEW_ROWS)
        .map(|cells| {
            cells
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect();
    Ok(lines.join("\n"))
}

//! Replacement of selected body tables by a rendered items table.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::{debug, info};

use crate::common::{Error, Result};
use crate::ooxml::docx::Package;
use crate::ooxml::docx::writer::MutableTable;
use crate::procurement::ClassifiedDataset;

/// Style id of Word's built-in "Table Grid" style.
const TABLE_GRID_STYLE: &str = "TableGrid";

/// Positions (0-based, body order) of the tables to remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSelection(BTreeSet<usize>);

impl TableSelection {
    /// Parse a JSON array of integers such as `[0, 2]`.
    ///
    /// Negative positions can never match a table and are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use edital::processor::TableSelection;
    ///
    /// let selection = TableSelection::from_json("[2, 0, -1, 2]").unwrap();
    /// assert_eq!(selection.iter().collect::<Vec<_>>(), [0, 2]);
    /// assert!(TableSelection::from_json("\"0\"").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let positions: Vec<i64> =
            serde_json::from_str(json).map_err(|e| Error::InvalidSelection(e.to_string()))?;
        Ok(positions
            .into_iter()
            .filter_map(|p| usize::try_from(p).ok())
            .collect())
    }

    /// Check whether a table position is selected.
    pub fn contains(&self, position: usize) -> bool {
        self.0.contains(&position)
    }

    /// Iterate over the selected positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<usize> for TableSelection {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Remove the selected tables and insert one table built from `replacement`
/// where the first of them was.
///
/// Positions past the last table are ignored. When no table is removed the
/// input bytes are returned unchanged. Any failure to read or write the
/// document is reported as [`Error::DocumentProcessing`].
pub fn assemble(
    document: &[u8],
    selection: &TableSelection,
    replacement: &ClassifiedDataset,
) -> Result<Vec<u8>> {
    let mut package = Package::from_bytes(document).map_err(Error::processing)?;

    let spans: Vec<Range<usize>> = package
        .document()
        .and_then(|part| part.tables())
        .map_err(Error::processing)?
        .iter()
        .enumerate()
        .filter(|(position, _)| selection.contains(*position))
        .map(|(_, table)| table.span())
        .collect();

    if spans.is_empty() {
        debug!("no selected table found, document left unchanged");
        return Ok(document.to_vec());
    }

    let use_grid_style = package
        .styles()
        .map_err(Error::processing)?
        .has_table_style(TABLE_GRID_STYLE);
    let table_xml = render_table(replacement, use_grid_style)?;

    let document_xml = package.document().map_err(Error::processing)?.xml_bytes();
    let spliced = splice(document_xml, &spans, table_xml.as_bytes());
    package
        .set_document_xml(spliced)
        .map_err(Error::processing)?;

    let bytes = package.to_bytes().map_err(Error::processing)?;
    info!(
        removed = spans.len(),
        rows = replacement.len(),
        "replaced selected tables"
    );
    Ok(bytes)
}

/// Render the header row and one row per classified item.
fn render_table(dataset: &ClassifiedDataset, use_grid_style: bool) -> Result<String> {
    let mut table = MutableTable::new();
    if use_grid_style {
        table.set_style(TABLE_GRID_STYLE);
    }
    table.set_width_percent(100);

    let header = table.add_row();
    for name in dataset.columns() {
        header.add_cell(name.as_str());
    }
    for values in dataset.value_rows() {
        let row = table.add_row();
        for value in values {
            row.add_cell(value.to_string());
        }
    }

    let mut xml = String::with_capacity(256 * (dataset.len() + 1));
    table.to_xml(&mut xml).map_err(Error::processing)?;
    Ok(xml)
}

/// Cut `spans` (sorted, disjoint) out of `xml` and put `insert` where the
/// first one was.
fn splice(xml: &[u8], spans: &[Range<usize>], insert: &[u8]) -> Vec<u8> {
    let removed: usize = spans.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(xml.len() - removed + insert.len());

    let mut cursor = 0;
    for (i, span) in spans.iter().enumerate() {
        out.extend_from_slice(&xml[cursor..span.start]);
        if i == 0 {
            out.extend_from_slice(insert);
        }
        cursor = span.end;
    }
    out.extend_from_slice(&xml[cursor..]);
    out
}

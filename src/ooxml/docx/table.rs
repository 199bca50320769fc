/// Table, Row, and Cell structures for Word documents.
use crate::common::xml::{push_entity, push_text};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;
use std::ops::Range;

// Element depths relative to the `w:tbl` root (which sits at depth 1).
const ROW_DEPTH: usize = 2;
const CELL_DEPTH: usize = 3;
const CELL_CHILD_DEPTH: usize = 4;
const CELL_PROPERTY_DEPTH: usize = 5;

/// Vertical merge state for table cells.
///
/// In OOXML, vertical merging uses the `<w:vMerge>` element:
/// - `restart`: Starts a new vertical merge (first cell in the merge)
/// - `continue`: Continues a vertical merge from the cell above (no `val` attribute or `val="continue"`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMergeState {
    /// Starts a vertical merge (`<w:vMerge w:val="restart"/>`)
    Restart,
    /// Continues a vertical merge from above (`<w:vMerge/>` or `<w:vMerge w:val="continue"/>`)
    Continue,
}

/// A body-level table in a Word document.
///
/// Represents a `<w:tbl>` element, together with the byte range it occupies
/// in the `document.xml` it was read from.
///
/// # Example
///
/// ```rust,ignore
/// for table in document.tables()? {
///     for row in table.cell_texts()? {
///         println!("{}", row.join(" | "));
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    /// The raw XML bytes of this table
    xml_bytes: Vec<u8>,
    /// Byte range of the table inside its part
    span: Range<usize>,
}

impl Table {
    /// Create a new Table from XML bytes and the span they were cut from.
    pub fn new(xml_bytes: Vec<u8>, span: Range<usize>) -> Self {
        Self { xml_bytes, span }
    }

    /// Get the byte range of this table inside `document.xml`.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Get the raw XML of this table.
    #[inline]
    pub fn xml_bytes(&self) -> &[u8] {
        &self.xml_bytes
    }

    /// Get all rows in this table.
    ///
    /// Only `<w:tr>` elements that are direct children of the table are rows,
    /// and only `<w:tc>` elements that are direct children of a row are cells.
    /// Tables nested inside cells contribute neither rows nor text.
    pub fn rows(&self) -> Result<SmallVec<[Row; 16]>> {
        let mut reader = Reader::from_reader(&self.xml_bytes[..]);

        let mut rows: SmallVec<[Row; 16]> = SmallVec::new();
        let mut depth = 0usize;
        let mut cell: Option<Cell> = None;
        // Depth of the open paragraph and run, if any
        let mut paragraph: Option<(usize, String)> = None;
        let mut run_depth: Option<usize> = None;
        let mut in_text = false;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    let name = e.local_name();
                    match (name.as_ref(), depth) {
                        (b"tr", ROW_DEPTH) => rows.push(Row::default()),
                        (b"tc", CELL_DEPTH) if !rows.is_empty() => cell = Some(Cell::default()),
                        (b"p", CELL_CHILD_DEPTH) if cell.is_some() => {
                            paragraph = Some((depth, String::new()));
                        },
                        (b"r", _) if paragraph.is_some() && run_depth.is_none() => {
                            run_depth = Some(depth);
                        },
                        (b"t", _) if run_depth == Some(depth - 1) => in_text = true,
                        _ => {},
                    }
                    if depth == CELL_PROPERTY_DEPTH {
                        if let Some(cell) = cell.as_mut() {
                            cell.apply_property(e)?;
                        }
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    let name = e.local_name();
                    if depth + 1 == CELL_PROPERTY_DEPTH {
                        if let Some(cell) = cell.as_mut() {
                            cell.apply_property(e)?;
                        }
                    }
                    if let (Some(run), Some((_, text))) = (run_depth, paragraph.as_mut()) {
                        if run == depth {
                            match name.as_ref() {
                                b"tab" => text.push('\t'),
                                b"br" | b"cr" => text.push('\n'),
                                _ => {},
                            }
                        }
                    }
                    if name.as_ref() == b"p" && depth + 1 == CELL_CHILD_DEPTH {
                        if let Some(cell) = cell.as_mut() {
                            cell.paragraphs.push(String::new());
                        }
                    }
                    if name.as_ref() == b"tc" && depth + 1 == CELL_DEPTH {
                        if let Some(row) = rows.last_mut() {
                            row.cells.push(Cell::default());
                        }
                    }
                },
                Ok(Event::Text(ref e)) if in_text => {
                    if let Some((_, text)) = paragraph.as_mut() {
                        push_text(text, e)?;
                    }
                },
                Ok(Event::GeneralRef(ref e)) if in_text => {
                    if let Some((_, text)) = paragraph.as_mut() {
                        push_entity(text, e)?;
                    }
                },
                Ok(Event::End(ref e)) => {
                    let name = e.local_name();
                    match name.as_ref() {
                        b"t" => in_text = false,
                        b"r" if run_depth == Some(depth) => run_depth = None,
                        b"p" if paragraph.as_ref().is_some_and(|(d, _)| *d == depth) => {
                            if let (Some((_, text)), Some(cell)) = (paragraph.take(), cell.as_mut())
                            {
                                cell.paragraphs.push(text);
                            }
                        },
                        b"tc" if depth == CELL_DEPTH => {
                            if let (Some(cell), Some(row)) = (cell.take(), rows.last_mut()) {
                                row.cells.push(cell);
                            }
                        },
                        _ => {},
                    }
                    depth = depth.saturating_sub(1);
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(rows)
    }

    /// Get the text of every cell, row by row, expanded over grid columns.
    ///
    /// A cell spanning N grid columns appears N times. A cell continuing a
    /// vertical merge repeats the text of the cell above it in the same grid
    /// column.
    pub fn cell_texts(&self) -> Result<Vec<Vec<String>>> {
        let rows = self.rows()?;
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut texts = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                let text = match cell.v_merge {
                    Some(VMergeState::Continue) => grid
                        .last()
                        .and_then(|above| above.get(texts.len()))
                        .cloned()
                        .unwrap_or_else(|| cell.text()),
                    _ => cell.text(),
                };
                for _ in 0..cell.grid_span.max(1) {
                    texts.push(text.clone());
                }
            }
            grid.push(texts);
        }

        Ok(grid)
    }
}

/// A row in a table.
///
/// Represents a `<w:tr>` element.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: SmallVec<[Cell; 16]>,
}

impl Row {
    /// Get the cells of this row, one per `<w:tc>`.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// A cell in a table.
///
/// Represents a `<w:tc>` element.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Text of each direct paragraph
    paragraphs: SmallVec<[String; 2]>,
    /// Number of grid columns spanned (`<w:gridSpan>`)
    grid_span: usize,
    /// Vertical merge participation (`<w:vMerge>`)
    v_merge: Option<VMergeState>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            paragraphs: SmallVec::new(),
            grid_span: 1,
            v_merge: None,
        }
    }
}

impl Cell {
    /// Get the text of this cell.
    ///
    /// Paragraph texts are joined with newlines and the result is trimmed.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n").trim().to_string()
    }

    /// Get the number of grid columns this cell spans.
    #[inline]
    pub fn grid_span(&self) -> usize {
        self.grid_span
    }

    /// Get the vertical merge state of this cell.
    #[inline]
    pub fn v_merge(&self) -> Option<VMergeState> {
        self.v_merge
    }

    /// Record a `<w:tcPr>` child.
    fn apply_property(&mut self, e: &BytesStart<'_>) -> Result<()> {
        match e.local_name().as_ref() {
            b"gridSpan" => {
                if let Some(val) = val_attribute(e)? {
                    self.grid_span =
                        val.trim().parse::<usize>().unwrap_or(1).clamp(1, MAX_GRID_COLUMNS);
                }
            },
            b"vMerge" => {
                self.v_merge = match val_attribute(e)?.as_deref() {
                    Some("restart") => Some(VMergeState::Restart),
                    _ => Some(VMergeState::Continue),
                };
            },
            _ => {},
        }
        Ok(())
    }
}

/// Widest table grid Word will open; larger spans are clamped to it.
const MAX_GRID_COLUMNS: usize = 63;

/// Get the `w:val` attribute of an element.
fn val_attribute(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"val" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

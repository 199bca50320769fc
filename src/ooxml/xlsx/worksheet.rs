//! Worksheet implementation for Excel files.
//!
//! Parses the `<sheetData>` of a worksheet part into dense rows of typed
//! values.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::cell::{CellType, cell_value, reference_to_coords};
use super::shared_strings::SharedStrings;
use crate::common::xml::{push_entity, push_text};
use crate::ooxml::error::{OoxmlError, Result};
use crate::sheet::CellValue;

/// Widest sheet SpreadsheetML allows (column `XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Information about a worksheet, as listed in `workbook.xml`.
#[derive(Debug, Clone)]
pub struct WorksheetInfo {
    /// Worksheet name
    pub name: String,
    /// Relationship ID for the worksheet part
    pub relationship_id: String,
    /// Sheet ID
    pub sheet_id: u32,
}

/// A row of the worksheet.
#[derive(Debug, Clone)]
pub struct SheetRow {
    /// Row number (1-based)
    pub number: u32,
    /// Values from column A onwards; missing cells are `Empty`
    pub cells: Vec<CellValue>,
    next_column: u32,
}

/// A parsed worksheet.
#[derive(Debug)]
pub struct Worksheet {
    info: WorksheetInfo,
    rows: Vec<SheetRow>,
    column_count: usize,
}

/// Text being collected for the current cell.
#[derive(Default)]
struct PendingCell {
    column: u32,
    cell_type: CellType,
    raw: Option<String>,
}

impl Worksheet {
    /// Parse a worksheet part.
    pub fn parse(info: WorksheetInfo, xml: &[u8], shared_strings: &SharedStrings) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut rows: Vec<SheetRow> = Vec::new();
        let mut column_count = 0usize;

        let mut cell: Option<PendingCell> = None;
        // Inside <v>, or inside <is>/<t> outside phonetic runs
        let mut in_value = false;
        let mut in_inline = false;
        let mut in_phonetic = false;
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"row" => rows.push(Self::start_row(e, rows.last())?),
                    b"c" => cell = Some(Self::start_cell(e, rows.last())?),
                    b"v" if cell.is_some() => in_value = true,
                    b"is" if cell.is_some() => in_inline = true,
                    b"rPh" => in_phonetic = true,
                    b"t" if in_inline && !in_phonetic => in_value = true,
                    _ => {},
                },
                Event::Empty(ref e) => match e.local_name().as_ref() {
                    b"row" => rows.push(Self::start_row(e, rows.last())?),
                    // A self-closed cell only carries formatting; it advances
                    // the implicit column position but never widens the sheet
                    b"c" => {
                        let pending = Self::start_cell(e, rows.last())?;
                        if let Some(row) = rows.last_mut() {
                            row.next_column = pending.column + 1;
                        }
                    },
                    _ => {},
                },
                Event::Text(ref e) if in_value => {
                    if let Some(pending) = cell.as_mut() {
                        push_text(pending.raw.get_or_insert_with(String::new), e)?;
                    }
                },
                Event::GeneralRef(ref e) if in_value => {
                    if let Some(pending) = cell.as_mut() {
                        push_entity(pending.raw.get_or_insert_with(String::new), e)?;
                    }
                },
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"v" => in_value = false,
                    b"t" if in_inline => in_value = false,
                    b"rPh" => in_phonetic = false,
                    b"is" => in_inline = false,
                    b"c" => {
                        if let (Some(pending), Some(row)) = (cell.take(), rows.last_mut()) {
                            let value =
                                cell_value(pending.cell_type, pending.raw.as_deref(), shared_strings)?;
                            Self::store(row, pending.column, value, &mut column_count);
                        }
                    },
                    _ => {},
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        for row in &mut rows {
            row.cells.resize(column_count, CellValue::Empty);
        }

        Ok(Self {
            info,
            rows,
            column_count,
        })
    }

    fn start_row(e: &BytesStart<'_>, previous: Option<&SheetRow>) -> Result<SheetRow> {
        let mut number = previous.map_or(1, |r| r.number + 1);
        for attr in e.attributes() {
            let attr = attr?;
            if attr.key.as_ref() == b"r" {
                if let Ok(n) = atoi_simd::parse::<u32>(attr.value.as_ref()) {
                    number = n;
                }
            }
        }
        Ok(SheetRow {
            number,
            cells: Vec::new(),
            next_column: 1,
        })
    }

    fn start_cell(e: &BytesStart<'_>, row: Option<&SheetRow>) -> Result<PendingCell> {
        let mut pending = PendingCell {
            column: row.map_or(1, |r| r.next_column),
            ..PendingCell::default()
        };
        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.as_ref() {
                b"r" => {
                    if let Some((column, _)) = reference_to_coords(&attr.unescape_value()?) {
                        pending.column = column;
                    }
                },
                b"t" => pending.cell_type = CellType::parse(&attr.unescape_value()?),
                _ => {},
            }
        }
        if pending.column > MAX_COLUMNS {
            return Err(OoxmlError::InvalidFormat(format!(
                "cell column {} is beyond the last worksheet column",
                pending.column
            )));
        }
        Ok(pending)
    }

    /// Place a value in its row; blank values only move the column cursor, so
    /// formatted but empty cells past the data never count as columns.
    fn store(row: &mut SheetRow, column: u32, value: CellValue, column_count: &mut usize) {
        let column = column.max(1);
        row.next_column = column + 1;
        if matches!(value, CellValue::Empty) {
            return;
        }
        let index = column as usize - 1;
        if row.cells.len() <= index {
            row.cells.resize(index + 1, CellValue::Empty);
        }
        row.cells[index] = value;
        *column_count = (*column_count).max(row.cells.len());
    }

    /// Get the worksheet name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Get the worksheet information.
    pub fn info(&self) -> &WorksheetInfo {
        &self.info
    }

    /// Get the rows present in the sheet, in order, each padded to
    /// [`column_count`](Self::column_count).
    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Get the number of columns, counted from column A to the last used one.
    pub fn column_count(&self) -> usize {
        self.column_count
    }
}

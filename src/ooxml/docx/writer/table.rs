/// Table types and serialization for DOCX documents.
use crate::common::xml::escape_xml_into;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// Edge names in the order `w:tblBorders` requires.
const BORDER_EDGES: [&str; 6] = ["top", "left", "bottom", "right", "insideH", "insideV"];

/// Thin single black line, used for every edge and inside line.
const BORDER_ATTRIBUTES: &str = "w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"000000\"";

/// Table properties.
#[derive(Debug)]
pub(crate) struct TableProperties {
    /// Style id (`w:tblStyle`), written only when set
    pub(crate) style: Option<String>,
    /// Width in fiftieths of a percent
    pub(crate) width_pct: u32,
}

impl Default for TableProperties {
    fn default() -> Self {
        Self {
            style: None,
            width_pct: 5000,
        }
    }
}

/// A table under construction, rendered as a `<w:tbl>` fragment.
///
/// # Examples
///
/// ```
/// use edital::ooxml::docx::writer::MutableTable;
///
/// let mut table = MutableTable::new();
/// table.add_row().add_cell("N");
/// table.add_row().add_cell("1");
///
/// let mut xml = String::new();
/// table.to_xml(&mut xml).unwrap();
/// assert!(xml.starts_with("<w:tbl>"));
/// ```
#[derive(Debug, Default)]
pub struct MutableTable {
    /// Table rows
    pub(crate) rows: Vec<MutableRow>,
    /// Table properties
    pub(crate) properties: TableProperties,
}

impl MutableTable {
    /// Create an empty table spanning the full text width with single borders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, empty row.
    pub fn add_row(&mut self) -> &mut MutableRow {
        let index = self.rows.len();
        self.rows.push(MutableRow::default());
        &mut self.rows[index]
    }

    /// Set table width as a percentage of the text width (1-100).
    pub fn set_width_percent(&mut self, percent: u32) {
        self.properties.width_pct = percent.clamp(1, 100) * 50;
    }

    /// Reference a table style by id (for example `TableGrid`).
    pub fn set_style(&mut self, style_id: impl Into<String>) {
        self.properties.style = Some(style_id.into());
    }

    /// Get the number of grid columns (the widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(MutableRow::cell_count).max().unwrap_or(0)
    }

    /// Append the `<w:tbl>` element for this table to `xml`.
    ///
    /// Rows shorter than the widest row are padded with empty cells, since a
    /// row must cover every grid column.
    pub fn to_xml(&self, xml: &mut String) -> Result<()> {
        let columns = self.column_count();

        xml.push_str("<w:tbl>");

        // Table properties, in schema order
        xml.push_str("<w:tblPr>");
        if let Some(ref style) = self.properties.style {
            xml.push_str("<w:tblStyle w:val=\"");
            escape_xml_into(style, xml);
            xml.push_str("\"/>");
        }
        write!(
            xml,
            "<w:tblW w:w=\"{}\" w:type=\"pct\"/>",
            self.properties.width_pct
        )
        .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        xml.push_str("<w:tblBorders>");
        for edge in BORDER_EDGES {
            write!(xml, "<w:{} {}/>", edge, BORDER_ATTRIBUTES)
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
        }
        xml.push_str("</w:tblBorders>");
        xml.push_str("<w:tblLook w:val=\"04A0\"/>");
        xml.push_str("</w:tblPr>");

        // Grid
        xml.push_str("<w:tblGrid>");
        for _ in 0..columns {
            xml.push_str("<w:gridCol/>");
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            row.to_xml(xml, columns);
        }

        xml.push_str("</w:tbl>");

        Ok(())
    }
}

/// A mutable table row.
#[derive(Debug, Default)]
pub struct MutableRow {
    /// Table cells in this row
    pub(crate) cells: Vec<MutableCell>,
}

impl MutableRow {
    /// Append a cell holding `text`.
    pub fn add_cell(&mut self, text: impl Into<String>) -> &mut Self {
        self.cells.push(MutableCell { text: text.into() });
        self
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    fn to_xml(&self, xml: &mut String, columns: usize) {
        xml.push_str("<w:tr>");
        for cell in &self.cells {
            cell.to_xml(xml);
        }
        for _ in self.cells.len()..columns {
            MutableCell::default().to_xml(xml);
        }
        xml.push_str("</w:tr>");
    }
}

/// A mutable table cell holding a single paragraph of text.
#[derive(Debug, Default)]
pub struct MutableCell {
    pub(crate) text: String,
}

impl MutableCell {
    fn to_xml(&self, xml: &mut String) {
        // Every cell needs at least one paragraph
        xml.push_str("<w:tc><w:p>");
        if !self.text.is_empty() {
            xml.push_str("<w:r><w:t xml:space=\"preserve\">");
            escape_xml_into(&self.text, xml);
            xml.push_str("</w:t></w:r>");
        }
        xml.push_str("</w:p></w:tc>");
    }
}

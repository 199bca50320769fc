//! End-to-end processing of one request's uploads.

use tracing::{debug, info, warn};

use super::assembler::{TableSelection, assemble};
use super::extractor::{TablePreview, extract};
use crate::common::{Error, Result};
use crate::ooxml::xlsx::Workbook;
use crate::procurement::{ColumnSchema, ItemDataset, QuotaRule, classify, worksheet_columns};

/// Client message for a spreadsheet that cannot be opened at all.
pub const UNREADABLE_SPREADSHEET: &str =
    "Could not read the spreadsheet. Check whether the file is corrupted or in the wrong format.";

/// Runs the extraction, validation, classification and assembly steps with a
/// fixed column schema and quota rule.
///
/// Holds no per-request state, so one instance can serve every request.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    schema: ColumnSchema,
    rule: QuotaRule,
}

impl Processor {
    /// Create a processor with a custom schema and rule.
    pub fn new(schema: ColumnSchema, rule: QuotaRule) -> Self {
        Self { schema, rule }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn rule(&self) -> &QuotaRule {
        &self.rule
    }

    /// List the document's body tables with previews.
    pub fn identify_tables(&self, document: &[u8]) -> Result<Vec<TablePreview>> {
        let previews = extract(document)?;
        info!(tables = previews.len(), "identified tables");
        Ok(previews)
    }

    /// Read the items of the first worksheet.
    pub fn read_items(&self, spreadsheet: &[u8]) -> Result<ItemDataset> {
        let workbook = Workbook::from_bytes(spreadsheet).map_err(Error::spreadsheet)?;
        let sheet = workbook.first_worksheet().map_err(Error::spreadsheet)?;
        ItemDataset::from_worksheet(&sheet, &self.schema)
    }

    /// Check that the spreadsheet opens and has every required column.
    ///
    /// Item values are not checked here; an item that cannot be apportioned
    /// is only reported when the documents are processed.
    pub fn validate_spreadsheet(&self, spreadsheet: &[u8]) -> Result<()> {
        let workbook = Workbook::from_bytes(spreadsheet).map_err(|e| {
            warn!(error = %e, "unreadable spreadsheet");
            Error::Parse(UNREADABLE_SPREADSHEET.to_string())
        })?;
        let sheet = workbook.first_worksheet().map_err(|e| {
            warn!(error = %e, "unreadable worksheet");
            Error::Parse(UNREADABLE_SPREADSHEET.to_string())
        })?;

        let header = worksheet_columns(&sheet);
        self.schema.check(&header)?;

        debug!(sheet = sheet.name(), columns = header.len(), "spreadsheet is valid");
        Ok(())
    }

    /// Classify the spreadsheet's items and replace the selected tables of
    /// the document with them.
    ///
    /// The spreadsheet is fully classified before the document is touched.
    pub fn process_documents(
        &self,
        document: &[u8],
        spreadsheet: &[u8],
        selection: &TableSelection,
    ) -> Result<Vec<u8>> {
        let items = self.read_items(spreadsheet)?;
        let classified = classify(&items, &self.rule)?;
        info!(
            items = items.len(),
            rows = classified.len(),
            "classified items"
        );
        assemble(document, selection, &classified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::Package;
    use crate::testing::fixtures;

    const HEADER: &[&str] = &["N", "DESCRIÇÃO", "UNIDADE FORNECIMENTO", "QUANTIDADE", "VALOR ESTIMADO"];

    fn items_sheet(rows: &[&[&str]]) -> Vec<u8> {
        let mut all: Vec<&[&str]> = vec![HEADER];
        all.extend_from_slice(rows);
        fixtures::xlsx(&all)
    }

    #[test]
    fn test_validate_spreadsheet() {
        let processor = Processor::default();
        assert!(processor.validate_spreadsheet(&items_sheet(&[])).is_ok());

        let partial = fixtures::xlsx(&[&["N", "DESCRIÇÃO", "VALOR ESTIMADO"]]);
        let err = processor.validate_spreadsheet(&partial).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required columns: UNIDADE FORNECIMENTO, QUANTIDADE"
        );
    }

    #[test]
    fn test_validate_unreadable_spreadsheet() {
        let err = Processor::default()
            .validate_spreadsheet(b"not a workbook")
            .unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), UNREADABLE_SPREADSHEET);
    }

    #[test]
    fn test_process_documents() {
        let doc = fixtures::docx(&[
            fixtures::table(&[&["old items"]]),
            fixtures::table(&[&["signatures"]]),
        ]);
        let sheet = items_sheet(&[
            &["1", "Papel A4", "Resma", "10", "100000"],
            &["2", "Caneta", "Caixa", "5", "500"],
        ]);
        let selection = TableSelection::from_json("[0]").unwrap();

        let out = Processor::default()
            .process_documents(&doc, &sheet, &selection)
            .unwrap();

        let package = Package::from_bytes(&out).unwrap();
        let tables = package.document().unwrap().tables().unwrap();
        assert_eq!(tables.len(), 2);

        let grid = tables[0].cell_texts().unwrap();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[0].last().map(String::as_str), Some("CLASSIFICAÇÃO"));
        assert_eq!(grid[1], ["1", "Papel A4", "Resma", "8", "80000", "Ampla concorrência"]);
        assert_eq!(grid[2][3], "2");
        assert_eq!(grid[2][4], "20000");
        assert!(grid[2][1].starts_with("Papel A4 - Respeitando"));
        assert_eq!(grid[3][5], "Exclusivo para ME/EPP");
        assert_eq!(tables[1].cell_texts().unwrap(), vec![vec!["signatures"]]);
    }

    #[test]
    fn test_invalid_item_stops_before_assembly() {
        let doc = fixtures::docx(&[fixtures::table(&[&["x"]])]);
        let sheet = items_sheet(&[&["7", "Mesa", "Unidade", "0", "90000"]]);
        let err = Processor::default()
            .process_documents(&doc, &sheet, &[0].into_iter().collect())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidItem { ref item, .. } if item == "7"));
    }

    #[test]
    fn test_broken_spreadsheet_is_a_parse_error() {
        let doc = fixtures::docx(&[]);
        let err = Processor::default()
            .process_documents(&doc, b"garbage", &TableSelection::default())
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_columns_on_process() {
        let doc = fixtures::docx(&[]);
        let sheet = fixtures::xlsx(&[&["N", "DESCRIÇÃO"]]);
        let err = Processor::default()
            .process_documents(&doc, &sheet, &TableSelection::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumns { .. }));
    }
}

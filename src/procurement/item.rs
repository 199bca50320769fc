//! Typed procurement items and the datasets that carry them.

use std::fmt;

use tracing::debug;

use super::schema::{self, ColumnSchema};
use crate::common::{Error, Result};
use crate::ooxml::xlsx::Worksheet;
use crate::sheet::CellValue;

/// Which quota a line item is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Reserved for micro and small enterprises (ME/EPP)
    ReservedQuota,
    /// Open to every bidder
    OpenCompetition,
}

impl Classification {
    /// The label written into the classification column.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::ReservedQuota => "Exclusivo para ME/EPP",
            Classification::OpenCompetition => "Ampla concorrência",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the items spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Item number as it appears in the sheet (usually a number, sometimes text)
    pub number: CellValue,
    pub description: String,
    pub supply_unit: CellValue,
    pub quantity: f64,
    pub estimated_value: f64,
    /// Values of the non-required columns, in sheet order
    pub extras: Vec<CellValue>,
}

impl Item {
    /// A short identifier for messages.
    pub fn label(&self) -> String {
        number_label(&self.number)
    }
}

/// An item with its quota assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedItem {
    pub item: Item,
    pub classification: Classification,
}

/// What a column of the sheet holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    Number,
    Description,
    SupplyUnit,
    Quantity,
    EstimatedValue,
    Classification,
    /// Index into [`Item::extras`]
    Extra(usize),
}

/// Column names of a dataset and where each one's value lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    names: Vec<String>,
    roles: Vec<ColumnRole>,
}

impl ColumnLayout {
    /// Assign roles to the columns of a header row.
    ///
    /// Required columns are taken by name; any previous classification
    /// column is remembered so its position can be reused on output; all
    /// other columns are carried as extras.
    fn new(names: Vec<String>) -> Self {
        let mut extras = 0;
        let roles = names
            .iter()
            .map(|name| match name.as_str() {
                schema::NUMBER => ColumnRole::Number,
                schema::DESCRIPTION => ColumnRole::Description,
                schema::SUPPLY_UNIT => ColumnRole::SupplyUnit,
                schema::QUANTITY => ColumnRole::Quantity,
                schema::ESTIMATED_VALUE => ColumnRole::EstimatedValue,
                schema::CLASSIFICATION => ColumnRole::Classification,
                _ => {
                    extras += 1;
                    ColumnRole::Extra(extras - 1)
                },
            })
            .collect();
        Self { names, roles }
    }

    /// Get the column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The layout of the classified output: the input columns plus the
    /// classification column at the end, unless the input already had one.
    fn with_classification(&self) -> Self {
        let mut layout = self.clone();
        if !layout.roles.contains(&ColumnRole::Classification) {
            layout.names.push(schema::CLASSIFICATION.to_string());
            layout.roles.push(ColumnRole::Classification);
        }
        layout
    }
}

/// The items of a spreadsheet, validated and typed.
#[derive(Debug, Clone)]
pub struct ItemDataset {
    layout: ColumnLayout,
    items: Vec<Item>,
}

impl ItemDataset {
    /// Build a dataset from a header row and data rows.
    ///
    /// Rows whose cells are all empty are skipped. Fails with
    /// [`Error::MissingColumns`] if the header lacks a required column, and
    /// with [`Error::InvalidItem`] if a quantity or value is not a finite
    /// number.
    pub fn from_rows(
        header: &[CellValue],
        rows: impl IntoIterator<Item = Vec<CellValue>>,
        schema: &ColumnSchema,
    ) -> Result<Self> {
        let layout = ColumnLayout::new(column_names(header));
        schema.check(layout.names())?;

        let mut items = Vec::new();
        for row in rows {
            if row.iter().all(CellValue::is_empty) {
                continue;
            }
            items.push(Self::item_from_row(&layout, row)?);
        }

        Ok(Self { layout, items })
    }

    /// Build a dataset from a worksheet whose first non-empty row is the header.
    pub fn from_worksheet(sheet: &Worksheet, schema: &ColumnSchema) -> Result<Self> {
        let mut rows = rows_from_header(sheet);
        let header = rows.next().cloned().unwrap_or_default();
        let dataset = Self::from_rows(&header, rows.cloned(), schema)?;
        debug!(
            sheet = sheet.name(),
            columns = dataset.layout.names.len(),
            items = dataset.items.len(),
            "read items sheet"
        );
        Ok(dataset)
    }

    fn item_from_row(layout: &ColumnLayout, row: Vec<CellValue>) -> Result<Item> {
        let mut number = CellValue::Empty;
        let mut description = CellValue::Empty;
        let mut supply_unit = CellValue::Empty;
        let mut quantity = CellValue::Empty;
        let mut estimated_value = CellValue::Empty;
        let mut extras = Vec::new();

        let mut cells = row.into_iter();
        for role in &layout.roles {
            let value = cells.next().unwrap_or(CellValue::Empty);
            match role {
                ColumnRole::Number => number = value,
                ColumnRole::Description => description = value,
                ColumnRole::SupplyUnit => supply_unit = value,
                ColumnRole::Quantity => quantity = value,
                ColumnRole::EstimatedValue => estimated_value = value,
                ColumnRole::Classification => {},
                ColumnRole::Extra(_) => extras.push(value),
            }
        }

        let label = number_label(&number);
        let quantity = numeric_field(&label, schema::QUANTITY, &quantity)?;
        let estimated_value = numeric_field(&label, schema::ESTIMATED_VALUE, &estimated_value)?;

        Ok(Item {
            number,
            description: description.to_string(),
            supply_unit,
            quantity,
            estimated_value,
            extras,
        })
    }

    /// Get the column names, in sheet order.
    pub fn columns(&self) -> &[String] {
        self.layout.names()
    }

    /// Get the items, in sheet order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub(crate) fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the dataset has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The output of the classifier, ready to be rendered as a table.
#[derive(Debug, Clone)]
pub struct ClassifiedDataset {
    layout: ColumnLayout,
    rows: Vec<ClassifiedItem>,
}

impl ClassifiedDataset {
    pub(crate) fn new(input: &ColumnLayout, rows: Vec<ClassifiedItem>) -> Self {
        Self {
            layout: input.with_classification(),
            rows,
        }
    }

    /// Get the output column names.
    pub fn columns(&self) -> &[String] {
        self.layout.names()
    }

    /// Get the classified rows, in output order.
    pub fn rows(&self) -> &[ClassifiedItem] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render every row as cell values, in column order.
    pub fn value_rows(&self) -> Vec<Vec<CellValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.layout
                    .roles
                    .iter()
                    .map(|role| match role {
                        ColumnRole::Number => row.item.number.clone(),
                        ColumnRole::Description => CellValue::String(row.item.description.clone()),
                        ColumnRole::SupplyUnit => row.item.supply_unit.clone(),
                        ColumnRole::Quantity => CellValue::from_f64(row.item.quantity),
                        ColumnRole::EstimatedValue => CellValue::from_f64(row.item.estimated_value),
                        ColumnRole::Classification => {
                            CellValue::String(row.classification.label().to_string())
                        },
                        ColumnRole::Extra(i) => {
                            row.item.extras.get(*i).cloned().unwrap_or(CellValue::Empty)
                        },
                    })
                    .collect()
            })
            .collect()
    }
}

/// The column names of a worksheet, read from its first non-empty row.
///
/// A sheet without any non-empty row has no columns.
pub fn worksheet_columns(sheet: &Worksheet) -> Vec<String> {
    rows_from_header(sheet)
        .next()
        .map(|header| column_names(header))
        .unwrap_or_default()
}

/// The rows of a sheet starting at its header row.
fn rows_from_header(sheet: &Worksheet) -> impl Iterator<Item = &Vec<CellValue>> {
    sheet
        .rows()
        .iter()
        .map(|r| &r.cells)
        .skip_while(|cells| cells.iter().all(CellValue::is_empty))
}

/// Turn header cells into column names.
///
/// Blank headers become `Unnamed: {index}` and repeated names get a `.1`,
/// `.2`, ... suffix, so every column keeps a distinct name.
fn column_names(header: &[CellValue]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (index, cell) in header.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Unnamed: {}", index)
        } else {
            cell.to_string()
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

fn number_label(number: &CellValue) -> String {
    if number.is_empty() {
        "(no number)".to_string()
    } else {
        number.to_string()
    }
}

fn numeric_field(item: &str, column: &str, value: &CellValue) -> Result<f64> {
    match value.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(Error::InvalidItem {
            item: item.to_string(),
            reason: format!("{} must be a number, got '{}'", column, value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> CellValue {
        CellValue::String(text.to_string())
    }

    fn header(names: &[&str]) -> Vec<CellValue> {
        names.iter().map(|n| s(n)).collect()
    }

    #[test]
    fn test_from_rows_with_extras() {
        let head = header(&["N", "LOTE", "DESCRIÇÃO", "UNIDADE FORNECIMENTO", "QUANTIDADE", "VALOR ESTIMADO"]);
        let rows = vec![
            vec![CellValue::Int(1), s("A"), s("Papel A4"), s("Resma"), CellValue::Int(10), CellValue::Float(1500.5)],
            vec![CellValue::Empty, s(" "), CellValue::Empty, CellValue::Empty, CellValue::Empty, CellValue::Empty],
            vec![CellValue::Int(2), s("B"), s("Caneta"), s("Caixa"), s("3"), CellValue::Int(90000)],
        ];
        let dataset = ItemDataset::from_rows(&head, rows, &ColumnSchema::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns()[1], "LOTE");

        let first = &dataset.items()[0];
        assert_eq!(first.number, CellValue::Int(1));
        assert_eq!(first.description, "Papel A4");
        assert_eq!(first.quantity, 10.0);
        assert_eq!(first.estimated_value, 1500.5);
        assert_eq!(first.extras, vec![s("A")]);
        assert_eq!(dataset.items()[1].quantity, 3.0);
    }

    #[test]
    fn test_missing_columns() {
        let head = header(&["N", "DESCRIÇÃO", "QUANTIDADE"]);
        let err = ItemDataset::from_rows(&head, Vec::new(), &ColumnSchema::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumns { ref missing } if missing == &["UNIDADE FORNECIMENTO", "VALOR ESTIMADO"]
        ));
    }

    #[test]
    fn test_non_numeric_quantity() {
        let head = header(&["N", "DESCRIÇÃO", "UNIDADE FORNECIMENTO", "QUANTIDADE", "VALOR ESTIMADO"]);
        let rows = vec![vec![CellValue::Int(7), s("Cadeira"), s("Un"), s("dez"), CellValue::Int(100)]];
        let err = ItemDataset::from_rows(&head, rows, &ColumnSchema::default()).unwrap_err();
        match err {
            Error::InvalidItem { item, reason } => {
                assert_eq!(item, "7");
                assert!(reason.contains("QUANTIDADE"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_names() {
        let names = column_names(&[s("N"), CellValue::Empty, s("N"), CellValue::Int(2024), s("N")]);
        assert_eq!(names, ["N", "Unnamed: 1", "N.1", "2024", "N.2"]);
    }

    #[test]
    fn test_formatted_blank_header_cells_are_not_columns() {
        use crate::ooxml::xlsx::{SharedStrings, WorksheetInfo};

        let names = ["N", "DESCRIÇÃO", "UNIDADE FORNECIMENTO", "QUANTIDADE", "VALOR ESTIMADO"];
        let xml = br#"<worksheet><sheetData>
            <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c><c r="E1" t="s"><v>4</v></c><c r="H1" s="3"/></row>
            <row r="2"><c r="A2"><v>1</v></c><c r="B2" t="inlineStr"><is><t>Papel</t></is></c><c r="C2" t="inlineStr"><is><t>Resma</t></is></c><c r="D2"><v>4</v></c><c r="E2"><v>100</v></c><c r="G2" s="3"/></row>
        </sheetData></worksheet>"#;
        let info = WorksheetInfo {
            name: "Planilha1".to_string(),
            relationship_id: "rId1".to_string(),
            sheet_id: 1,
        };
        let strings = SharedStrings::from_strings(names.iter().map(|n| n.to_string()).collect());
        let sheet = Worksheet::parse(info, xml, &strings).unwrap();

        assert_eq!(worksheet_columns(&sheet), names);
        let dataset = ItemDataset::from_worksheet(&sheet, &ColumnSchema::default()).unwrap();
        assert_eq!(dataset.columns(), names);
        assert!(dataset.items()[0].extras.is_empty());
    }

    #[test]
    fn test_existing_classification_column_is_reused() {
        let layout = ColumnLayout::new(vec!["N".into(), "CLASSIFICAÇÃO".into(), "DESCRIÇÃO".into()]);
        assert_eq!(layout.with_classification().names(), ["N", "CLASSIFICAÇÃO", "DESCRIÇÃO"]);

        let layout = ColumnLayout::new(vec!["N".into(), "DESCRIÇÃO".into()]);
        assert_eq!(layout.with_classification().names(), ["N", "DESCRIÇÃO", "CLASSIFICAÇÃO"]);
    }
}

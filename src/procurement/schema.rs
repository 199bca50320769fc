//! Required spreadsheet columns.

use crate::common::{Error, Result};

/// Item number column.
pub const NUMBER: &str = "N";
/// Item description column.
pub const DESCRIPTION: &str = "DESCRIÇÃO";
/// Unit of supply column.
pub const SUPPLY_UNIT: &str = "UNIDADE FORNECIMENTO";
/// Quantity column.
pub const QUANTITY: &str = "QUANTIDADE";
/// Estimated total value column.
pub const ESTIMATED_VALUE: &str = "VALOR ESTIMADO";
/// Column written by the classifier.
pub const CLASSIFICATION: &str = "CLASSIFICAÇÃO";

/// Columns every items spreadsheet must have, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 5] = [NUMBER, DESCRIPTION, SUPPLY_UNIT, QUANTITY, ESTIMATED_VALUE];

/// A fixed set of required column names.
///
/// Names compare exactly: case and surrounding whitespace are significant.
///
/// # Examples
///
/// ```
/// use edital::procurement::ColumnSchema;
///
/// let schema = ColumnSchema::default();
/// let columns = ["N", "DESCRIÇÃO", "QUANTIDADE"];
/// assert!(!schema.validate(&columns));
/// assert_eq!(schema.missing(&columns), ["UNIDADE FORNECIMENTO", "VALOR ESTIMADO"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColumnSchema {
    required: &'static [&'static str],
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self::new(&REQUIRED_COLUMNS)
    }
}

impl ColumnSchema {
    pub const fn new(required: &'static [&'static str]) -> Self {
        Self { required }
    }

    /// Get the required names.
    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    /// Check that every required column is present. Extra columns and
    /// column order do not matter.
    pub fn validate<S: AsRef<str>>(&self, columns: &[S]) -> bool {
        self.required
            .iter()
            .all(|name| columns.iter().any(|c| c.as_ref() == *name))
    }

    /// Get the required columns that are absent, in required order.
    pub fn missing<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        self.required
            .iter()
            .filter(|name| !columns.iter().any(|c| c.as_ref() == **name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Fail with [`Error::MissingColumns`] unless every required column is present.
    pub fn check<S: AsRef<str>>(&self, columns: &[S]) -> Result<()> {
        let missing = self.missing(columns);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingColumns { missing })
        }
    }
}

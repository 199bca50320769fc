//! Procurement items and the ME/EPP quota rule.
//!
//! - [`schema`]: the required spreadsheet columns
//! - [`item`]: typed items and datasets built from a worksheet
//! - [`classifier`]: the apportionment of each item between the reserved
//!   quota and open competition

pub mod classifier;
pub mod item;
pub mod schema;

pub use classifier::{Apportionment, QuotaRule, classify};
pub use item::{
    Classification, ClassifiedDataset, ClassifiedItem, Item, ItemDataset, worksheet_columns,
};
pub use schema::{ColumnSchema, REQUIRED_COLUMNS};

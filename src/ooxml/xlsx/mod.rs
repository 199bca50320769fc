//! Excel (.xlsx) spreadsheet reading.
//!
//! Only what a tabular import needs: the worksheet list, the shared strings
//! table and typed cell values of a worksheet's `<sheetData>`.
//!
//! ```rust,no_run
//! use edital::ooxml::xlsx::Workbook;
//!
//! let data = std::fs::read("itens.xlsx")?;
//! let workbook = Workbook::from_bytes(&data)?;
//! for row in workbook.first_worksheet()?.rows() {
//!     println!("{}: {:?}", row.number, row.cells);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cell;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
pub use worksheet::{SheetRow, Worksheet, WorksheetInfo};

//! Common types for spreadsheet operations.

use std::fmt;

use crate::common::{format_number, parse_number};

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Error value (`#DIV/0!`, `#N/A`, ...)
    Error(String),
}

impl CellValue {
    /// Check if the cell holds nothing, or only whitespace text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Get the cell as a number.
    ///
    /// Text that spells a plain decimal number is accepted too, since
    /// spreadsheets often store amounts typed as text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// Build a numeric cell, keeping integral values as `Int`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }
}

impl fmt::Display for CellValue {
    /// Render the value as it appears in a rendered table cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("TRUE"),
            CellValue::Bool(false) => f.write_str("FALSE"),
            CellValue::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            CellValue::Float(v) => f.write_str(&format_number(*v)),
            CellValue::String(s) | CellValue::Error(s) => f.write_str(s),
        }
    }
}

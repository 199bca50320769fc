//! Cell references and typed cell values for Excel worksheets.

use crate::common::parse_number;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::shared_strings::SharedStrings;
use crate::sheet::CellValue;

/// Convert column number to Excel column letters (e.g., 1 -> "A", 26 -> "Z", 27 -> "AA").
pub fn column_to_letters(col: u32) -> String {
    let mut letters = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        let letter = ((col % 26) as u8 + b'A') as char;
        letters.insert(0, letter);
        col /= 26;
    }

    letters
}

/// Convert an Excel reference (e.g., "B7") to 1-based (column, row) numbers.
///
/// Returns `None` for anything that is not letters followed by digits.
pub fn reference_to_coords(reference: &str) -> Option<(u32, u32)> {
    let split = reference
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || digits.is_empty() {
        return None;
    }

    let mut col_num = 0u32;
    for ch in letters.bytes() {
        col_num = col_num
            .checked_mul(26)?
            .checked_add(u32::from(ch.to_ascii_uppercase() - b'A') + 1)?;
    }
    let row_num = atoi_simd::parse::<u32>(digits.as_bytes()).ok()?;

    Some((col_num, row_num))
}

/// The `t` attribute of a `<c>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellType {
    /// Number (no `t`, or `t="n"`)
    #[default]
    Number,
    /// Index into the shared strings table (`t="s"`)
    SharedString,
    /// Text in an `<is>` child (`t="inlineStr"`)
    InlineString,
    /// Formula result text (`t="str"`)
    FormulaString,
    /// `0` or `1` (`t="b"`)
    Boolean,
    /// Error text (`t="e"`)
    Error,
    /// ISO 8601 date text (`t="d"`)
    Date,
}

impl CellType {
    pub fn parse(value: &str) -> Self {
        match value {
            "s" => Self::SharedString,
            "inlineStr" => Self::InlineString,
            "str" => Self::FormulaString,
            "b" => Self::Boolean,
            "e" => Self::Error,
            "d" => Self::Date,
            _ => Self::Number,
        }
    }
}

/// Build the value of a cell from its type and raw text.
///
/// `raw` is the content of `<v>`, or the text of `<is>` for inline strings.
pub fn cell_value(
    cell_type: CellType,
    raw: Option<&str>,
    shared_strings: &SharedStrings,
) -> Result<CellValue> {
    let Some(raw) = raw else {
        return Ok(CellValue::Empty);
    };

    let value = match cell_type {
        CellType::Number => match parse_number(raw) {
            Some(n) => CellValue::from_f64(n),
            None if raw.trim().is_empty() => CellValue::Empty,
            None => {
                return Err(OoxmlError::InvalidFormat(format!(
                    "invalid numeric cell value '{}'",
                    raw
                )));
            },
        },
        CellType::SharedString => {
            let index = atoi_simd::parse::<u32>(raw.trim().as_bytes()).map_err(|_| {
                OoxmlError::InvalidFormat(format!("invalid shared string index '{}'", raw))
            })?;
            let text = shared_strings.get(index as usize).ok_or_else(|| {
                OoxmlError::InvalidFormat(format!("shared string index {} out of range", index))
            })?;
            CellValue::String(text.to_string())
        },
        CellType::InlineString | CellType::FormulaString | CellType::Date => {
            CellValue::String(raw.to_string())
        },
        CellType::Boolean => CellValue::Bool(raw.trim() == "1"),
        CellType::Error => CellValue::Error(raw.to_string()),
    };

    Ok(value)
}

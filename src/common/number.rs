//! Numeric text conversion used when reading spreadsheet cells and when
//! rendering amounts into Word table cells.

/// Largest magnitude rendered through the integer path; beyond this an f64
/// no longer represents every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Render a number for display in a table cell.
///
/// Integral values render without a fractional part (`80000`), everything
/// else in shortest round-trip form (`2.5`, `0.1`).
///
/// # Examples
///
/// ```
/// use edital::common::format_number;
/// assert_eq!(format_number(80000.0), "80000");
/// assert_eq!(format_number(2.5), "2.5");
/// assert_eq!(format_number(-3.0), "-3");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        let mut buf = itoa::Buffer::new();
        buf.format(value as i64).to_owned()
    } else {
        let mut buf = ryu::Buffer::new();
        buf.format(value).to_owned()
    }
}

/// Parse a number typed as text into a spreadsheet cell.
///
/// Surrounding whitespace is ignored. Returns `None` when the text is not a
/// plain decimal number.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int_val) = atoi_simd::parse(trimmed.as_bytes()) {
        let int_val: i64 = int_val;
        return Some(int_val as f64);
    }
    fast_float2::parse(trimmed).ok()
}

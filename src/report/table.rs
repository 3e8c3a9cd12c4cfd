//! Fixed-width, right-aligned text columns.

use std::fmt;

/// Column width used by the instance and solution tables.
pub const COLUMN_WIDTH: usize = 15;

/// A single table cell.
///
/// Reals render with three decimals; integers and text render verbatim.
///
/// # Examples
///
/// ```
/// use u_toptw::report::Cell;
///
/// assert_eq!(Cell::Real(35.0).to_string(), "35.000");
/// assert_eq!(Cell::Int(7).to_string(), "7");
/// assert_eq!(Cell::from("DUE DATE").to_string(), "DUE DATE");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Real value.
    Real(f64),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<usize> for Cell {
    fn from(v: usize) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Real(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Real(v) => f.write_str(&format_real(*v)),
        }
    }
}

/// Formats a real with exactly three decimals.
pub fn format_real(value: f64) -> String {
    format!("{value:.3}")
}

/// Right-aligns every cell in a column of `width` characters.
///
/// Cells wider than `width` are not truncated.
///
/// # Examples
///
/// ```
/// use u_toptw::report::{format_row, Cell};
///
/// let row = format_row(&[Cell::Int(1), Cell::Real(2.5)], 6);
/// assert_eq!(row, "     1 2.500");
/// ```
pub fn format_row(cells: &[Cell], width: usize) -> String {
    cells
        .iter()
        .map(|c| format!("{:>width$}", c.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(0.0), "0.000");
        assert_eq!(format_real(12.3456), "12.346");
        assert_eq!(format_real(-1.5), "-1.500");
    }

    #[test]
    fn test_format_row_widths() {
        let row = format_row(&[Cell::from("CUST NO."), Cell::from(3usize)], COLUMN_WIDTH);
        assert_eq!(row.len(), 2 * COLUMN_WIDTH);
        assert_eq!(row, "       CUST NO.              3");
    }

    #[test]
    fn test_overflowing_cell() {
        let row = format_row(&[Cell::from("ABCDEFG")], 3);
        assert_eq!(row, "ABCDEFG");
    }
}

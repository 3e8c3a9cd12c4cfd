//! Fixed-width text reports for instances and solutions.

mod solution;
mod table;

pub use solution::render_solution;
pub use table::{format_real, format_row, Cell, COLUMN_WIDTH};

//! Output formatting for CLI

mod table;

pub use table::{results_table, TableFormatter};

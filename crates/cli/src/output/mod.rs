pub mod confirm;
mod format;
pub mod spinner;
mod table;
pub mod theme;

pub use format::{print_error, print_json, print_success, OutputMode};
pub use table::{key_table, rule_table};

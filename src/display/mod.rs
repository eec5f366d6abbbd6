//! Display formatting for terminal output

pub mod category;
pub mod expense;

pub use category::format_category_list;
pub use expense::{category_label, format_expense_short, format_expense_table, NO_CATEGORY};

//! Expense display formatting
//!
//! Renders the expense register as a table. A dangling category reference
//! shows as "(no category)"; the installment column comes straight from the
//! installment label.

use std::fmt::Write;

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::{Settings, DEFAULT_DATE_FORMAT};
use crate::models::Expense;

/// Shown when an expense's category no longer exists
pub const NO_CATEGORY: &str = "(no category)";

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Installments")]
    installments: String,
}

/// Category column text for an expense
pub fn category_label(expense: &Expense) -> &str {
    expense.category_name().unwrap_or(NO_CATEGORY)
}

/// Render `date` with `pattern`, or with the default format if chrono
/// cannot render the pattern
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    out
}

/// Format the expense register
pub fn format_expense_table(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|expense| ExpenseRow {
        id: expense.id.to_string(),
        description: expense.description.clone(),
        amount: format!("{}{}", settings.currency_symbol, expense.amount),
        date: format_date(expense.date, &settings.date_format),
        category: category_label(expense).to_string(),
        installments: expense.installment_label(),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());

    let noun = if expenses.len() == 1 { "expense" } else { "expenses" };
    format!("{}\n{} {}\n", table, expenses.len(), noun)
}

/// Format a one-line confirmation for a newly recorded expense
pub fn format_expense_short(expense: &Expense, settings: &Settings) -> String {
    format!(
        "{} {} {}{} [{}] installments: {}",
        expense.id,
        format_date(expense.date, &settings.date_format),
        settings.currency_symbol,
        expense.amount,
        category_label(expense),
        expense.installment_label()
    )
}

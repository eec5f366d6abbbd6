//! Expense CLI commands
//!
//! `add` fills an [`ExpenseForm`] from the arguments and hands it to the
//! store, so the same required-field rules apply as everywhere else.

use clap::Subcommand;

use super::warn_if_stale;
use crate::backend::Backend;
use crate::config::Settings;
use crate::display::{format_expense_short, format_expense_table};
use crate::error::GastosResult;
use crate::models::{CategoryId, ExpenseId};
use crate::services::{ExpenseForm, SyncController};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List all expenses
    List,

    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount as accepted by the backend (e.g. "1500.50")
        amount: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Category ID
        #[arg(short, long)]
        category: Option<CategoryId>,
        /// Installment as CURRENT/TOTAL, e.g. 3/12
        #[arg(short, long, value_parser = parse_installment, conflicts_with_all = ["current", "total"])]
        installment: Option<(String, String)>,
        /// Current installment number
        #[arg(long)]
        current: Option<String>,
        /// Total number of installments
        #[arg(long)]
        total: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

/// Parse `CURRENT/TOTAL`. The halves are kept raw; bad counts are
/// treated as missing further down.
fn parse_installment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('/')
        .map(|(current, total)| (current.trim().to_string(), total.trim().to_string()))
        .ok_or_else(|| format!("expected CURRENT/TOTAL, got '{}'", raw))
}

/// Handle an expense command
pub async fn handle_expense_command<B: Backend>(
    controller: &SyncController<B>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> GastosResult<()> {
    let store = controller.expenses();

    match cmd {
        ExpenseCommands::List => {
            let expenses = store.list().await?;
            print!("{}", format_expense_table(&expenses, settings));
        }

        ExpenseCommands::Add {
            description,
            amount,
            date,
            category,
            installment,
            current,
            total,
        } => {
            let (is_installment, current, total) = match installment {
                Some((current, total)) => (true, current, total),
                None => (
                    current.is_some() || total.is_some(),
                    current.unwrap_or_default(),
                    total.unwrap_or_default(),
                ),
            };

            let form = ExpenseForm {
                description,
                amount,
                date: date.unwrap_or_else(|| {
                    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
                }),
                category_id: category,
                is_installment,
                current_installment: current,
                total_installments: total,
            };

            let synced = store.create(&form).await?;
            warn_if_stale(&synced);
            println!("Recorded expense:");
            match &synced.value {
                Some(expense) => println!("  {}", format_expense_short(expense, settings)),
                None => println!("  {}", form.description),
            }
        }

        ExpenseCommands::Delete { id } => {
            let synced = store.delete(id).await?;
            warn_if_stale(&synced);
            println!("Deleted expense {}", synced.into_value());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_installment() {
        assert_eq!(
            parse_installment("3/12").unwrap(),
            ("3".to_string(), "12".to_string())
        );
        assert_eq!(
            parse_installment(" 1 / ").unwrap(),
            ("1".to_string(), String::new())
        );
        assert!(parse_installment("3").is_err());
    }
}

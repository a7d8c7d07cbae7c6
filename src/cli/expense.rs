//! Expense CLI commands
//!
//! Implements CLI commands for recording and revising expense entries.

use clap::Subcommand;

use super::month::resolve_month;
use crate::config::Settings;
use crate::display::entry::{expense_label, format_expense_list};
use crate::error::LedgerResult;
use crate::models::EntryKind;
use crate::services::{EntryFilter, EntryService};
use crate::storage::LedgerStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense
    #[command(allow_negative_numbers = true)]
    Add {
        /// Expense category index (0-17, see `ledger categories`)
        index: i64,
        /// Amount (e.g. "1200", "-500", "99.5")
        amount: String,
        /// Month (YYYY-MM, current, last, next)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change an expense's amount and month
    #[command(allow_negative_numbers = true)]
    Edit {
        /// Entry ID or unique prefix
        id: String,
        /// New amount
        amount: String,
        /// New month (defaults to the entry's current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Entry ID or unique prefix
        id: String,
    },

    /// List expense history
    List {
        /// Only entries in this month
        #[arg(short, long)]
        month: Option<String>,
        /// Only entries in this category index
        #[arg(short, long)]
        category: Option<i64>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    store: &mut LedgerStore,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    let mut service = EntryService::new(store);

    match cmd {
        ExpenseCommands::Add {
            index,
            amount,
            month,
        } => {
            let month = resolve_month(month.as_deref(), settings)?;
            let entry = service.add_expense(index, &amount, month)?;

            println!("Recorded expense: {}", expense_label(&entry));
            println!("  Amount: {}", settings.format_amount(entry.amount));
            println!("  Month:  {}", entry.month);
            println!("  ID:     {}", entry.id);
        }

        ExpenseCommands::Edit { id, amount, month } => {
            let month = month
                .as_deref()
                .map(|m| resolve_month(Some(m), settings))
                .transpose()?;
            let edited = service.edit(EntryKind::Expense, &id, &amount, month)?;

            println!("Updated expense {}", edited.id().short());
            println!("  Amount: {}", settings.format_amount(edited.amount()));
            println!("  Month:  {}", edited.month());
        }

        ExpenseCommands::Delete { id } => {
            if service.delete(EntryKind::Expense, &id)? {
                println!("Deleted expense {}", id);
            } else {
                println!("No expense matches '{}'; nothing deleted", id);
            }
        }

        ExpenseCommands::List { month, category } => {
            let mut filter = EntryFilter::new();
            if let Some(m) = month.as_deref() {
                filter = filter.month(resolve_month(Some(m), settings)?);
            }
            if let Some(index) = category {
                filter = filter.category(index);
            }

            let entries = service.list_expenses(&filter);
            print!("{}", format_expense_list(&entries, settings));
        }
    }

    Ok(())
}

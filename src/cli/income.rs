//! Income CLI commands

use clap::Subcommand;

use super::month::resolve_month;
use crate::config::Settings;
use crate::display::entry::{format_income_list, income_label};
use crate::error::LedgerResult;
use crate::models::EntryKind;
use crate::services::{EntryFilter, EntryService};
use crate::storage::LedgerStore;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Record income
    #[command(allow_negative_numbers = true)]
    Add {
        /// Income category key (A-G, EE; see `ledger categories`)
        key: String,
        /// Amount
        amount: String,
        /// Month (YYYY-MM, current, last, next)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Change an income entry's amount and month
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

    /// Delete an income entry
    Delete {
        /// Entry ID or unique prefix
        id: String,
    },

    /// List income history
    List {
        /// Only entries in this month
        #[arg(short, long)]
        month: Option<String>,
        /// Only entries with this key
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle an income command
pub fn handle_income_command(
    store: &mut LedgerStore,
    settings: &Settings,
    cmd: IncomeCommands,
) -> LedgerResult<()> {
    let mut service = EntryService::new(store);

    match cmd {
        IncomeCommands::Add { key, amount, month } => {
            let month = resolve_month(month.as_deref(), settings)?;
            let entry = service.add_income(&key, &amount, month)?;

            println!("Recorded income: {}", income_label(&entry));
            println!("  Amount: {}", settings.format_amount(entry.amount));
            println!("  Month:  {}", entry.month);
            println!("  ID:     {}", entry.id);
        }

        IncomeCommands::Edit { id, amount, month } => {
            let month = month
                .as_deref()
                .map(|m| resolve_month(Some(m), settings))
                .transpose()?;
            let edited = service.edit(EntryKind::Income, &id, &amount, month)?;

            println!("Updated income {}", edited.id().short());
            println!("  Amount: {}", settings.format_amount(edited.amount()));
            println!("  Month:  {}", edited.month());
        }

        IncomeCommands::Delete { id } => {
            if service.delete(EntryKind::Income, &id)? {
                println!("Deleted income {}", id);
            } else {
                println!("No income entry matches '{}'; nothing deleted", id);
            }
        }

        IncomeCommands::List { month, category } => {
            let mut filter = EntryFilter::new();
            if let Some(m) = month.as_deref() {
                filter = filter.month(resolve_month(Some(m), settings)?);
            }
            if let Some(key) = category {
                filter = filter.category(key.trim().to_string());
            }

            let entries = service.list_income(&filter);
            print!("{}", format_income_list(&entries, settings));
        }
    }

    Ok(())
}

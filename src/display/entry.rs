//! Entry display formatting
//!
//! Formats expense and income history for terminal display.

use crate::config::Settings;
use crate::models::category;
use crate::models::{Amount, Entry, ExpenseEntry, IncomeEntry};

const LABEL_WIDTH: usize = 34;

/// Label for an expense entry's category
///
/// Indices outside the registry show as `#<index>` rather than failing the
/// whole listing.
pub fn expense_label(entry: &ExpenseEntry) -> String {
    usize::try_from(entry.category)
        .ok()
        .and_then(|index| category::expense_category_label(index).ok())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", entry.category))
}

/// Label for an income entry's key, falling back to the key itself
pub fn income_label(entry: &IncomeEntry) -> String {
    category::income_category_label(&entry.category).to_string()
}

/// Format a single entry for display (history row)
fn format_row<R>(entry: &Entry<R>, label: &str, settings: &Settings) -> String {
    format!(
        "{:8}  {:7}  {:<width$} {:>14}  {}",
        entry.id.short(),
        entry.month,
        truncate(label, LABEL_WIDTH),
        settings.format_amount(entry.amount),
        entry.recorded_at,
        width = LABEL_WIDTH
    )
}

fn format_table<R>(
    entries: &[Entry<R>],
    label: impl Fn(&Entry<R>) -> String,
    empty: &str,
    settings: &Settings,
) -> String {
    if entries.is_empty() {
        return format!("{}\n", empty);
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8}  {:7}  {:<width$} {:>14}  {}\n",
        "ID",
        "Month",
        "Category",
        "Amount",
        "Recorded",
        width = LABEL_WIDTH
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for entry in entries {
        output.push_str(&format_row(entry, &label(entry), settings));
        output.push('\n');
    }

    let total: Amount = entries.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(90));
    output.push('\n');
    output.push_str(&format!(
        "{} entries, total {}\n",
        entries.len(),
        settings.format_amount(total)
    ));

    output
}

/// Format expense history as a table
pub fn format_expense_list(entries: &[ExpenseEntry], settings: &Settings) -> String {
    format_table(entries, expense_label, "No expense entries found.", settings)
}

/// Format income history as a table
pub fn format_income_list(entries: &[IncomeEntry], settings: &Settings) -> String {
    format_table(entries, income_label, "No income entries found.", settings)
}

/// Truncate a label to a maximum number of characters
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

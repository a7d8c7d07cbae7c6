//! Month arguments
//!
//! Accepts `YYYY-MM` or a relative keyword: `current` (also `now`, `this`),
//! `last` (also `prev`, `previous`) and `next`. Keywords are relative to the
//! local calendar month.

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Month;

/// Parse a month argument relative to `today`
pub fn parse_month_arg(arg: &str, today: Month) -> LedgerResult<Month> {
    match arg.trim().to_lowercase().as_str() {
        "current" | "now" | "this" => Ok(today),
        "last" | "prev" | "previous" => Ok(today.prev()),
        "next" => Ok(today.next()),
        _ => Month::parse(arg.trim()).map_err(|e| LedgerError::InvalidMonth(e.to_string())),
    }
}

/// Resolve an optional month argument, falling back to the configured month
pub fn resolve_month(arg: Option<&str>, settings: &Settings) -> LedgerResult<Month> {
    match arg {
        Some(s) => parse_month_arg(s, Month::current()),
        None => Ok(settings.selected_month()),
    }
}

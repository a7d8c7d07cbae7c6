//! Carry-over calculator
//!
//! The balance brought into a month from earlier months, and the month's
//! closing balance built on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::{Amount, Month};
use crate::storage::LedgerStore;

use super::aggregation::{
    sum_by_expense_category, sum_by_income_category, total_expense, total_income,
};

/// How the carried-over balance is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarryOverMode {
    /// Income minus expenses over every month before the selected one
    #[default]
    Cumulative,
    /// Income minus expenses of the immediately preceding month only
    PreviousMonth,
}

impl CarryOverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cumulative => "cumulative",
            Self::PreviousMonth => "previous-month",
        }
    }
}

impl fmt::Display for CarryOverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarryOverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cumulative" => Ok(Self::Cumulative),
            "previous-month" | "previous" | "prev" => Ok(Self::PreviousMonth),
            other => Err(format!(
                "unknown carry-over mode '{}' (expected cumulative or previous-month)",
                other
            )),
        }
    }
}

/// Balance carried into `month`
///
/// Uses the raw amounts of every contributing entry, including income
/// under unknown keys, so a month's carry-over always equals the prior
/// ledger's net.
pub fn carried_over(store: &LedgerStore, month: Month, mode: CarryOverMode) -> Amount {
    let (income, expenses) = match mode {
        CarryOverMode::Cumulative => (store.income().before(month), store.expenses().before(month)),
        CarryOverMode::PreviousMonth => {
            let prev = month.prev();
            (store.income().for_month(prev), store.expenses().for_month(prev))
        }
    };

    let income: Amount = income.iter().map(|e| e.amount).sum();
    let expenses: Amount = expenses.iter().map(|e| e.amount).sum();
    income - expenses
}

/// Closing balance of `month`: income plus carry-over minus expenses
pub fn balance(store: &LedgerStore, month: Month, mode: CarryOverMode) -> LedgerResult<Amount> {
    let expense = total_expense(&sum_by_expense_category(store.expenses().for_month(month))?);
    let income = total_income(&sum_by_income_category(store.income().for_month(month)));
    Ok(income + carried_over(store, month, mode) - expense)
}

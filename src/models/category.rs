//! Category registry
//!
//! Expense categories are a fixed ordered list addressed by index; income
//! categories are keyed by a short code. Three named groups collect
//! expense categories into subtotals. None of this changes at runtime.

use std::fmt;

use crate::error::{LedgerError, LedgerResult};

/// An expense category, addressed by its position in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseCategory {
    /// Position in the registry and in the bucket array
    pub index: usize,
    /// Human-readable label
    pub label: &'static str,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// An income category, addressed by its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeCategory {
    /// Storage and lookup key
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// A named set of expense categories that share a subtotal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseGroup {
    /// Stable group name used for lookups
    pub name: &'static str,
    /// Display label
    pub label: &'static str,
    /// Member indices in display order
    pub indices: &'static [usize],
}

impl ExpenseGroup {
    /// Check whether the group contains an expense index
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

macro_rules! expense_categories {
    ($($index:literal => $label:literal),+ $(,)?) => {
        [$(ExpenseCategory { index: $index, label: $label }),+]
    };
}

/// Number of expense categories
pub const EXPENSE_CATEGORY_COUNT: usize = 18;

static EXPENSE_CATEGORIES: [ExpenseCategory; EXPENSE_CATEGORY_COUNT] = expense_categories![
    0 => "1 Pastoral stipend",
    1 => "2 Staff welfare",
    2 => "2.2 Dedicated worker support",
    3 => "3 Pastoral care & evangelism",
    4 => "4 Education & training",
    5 => "5 Guest speaker honoraria",
    6 => "6 Church school & youth ministry",
    7 => "7 Association & convention dues",
    8 => "8 Missions",
    9 => "9 Parsonage upkeep",
    10 => "10 Utilities",
    11 => "11 Vehicles & transportation",
    12 => "12 Communications & office",
    13 => "13 Equipment & repairs",
    14 => "14 Hospitality & condolences",
    15 => "15 Miscellaneous",
    16 => "16 Designated offerings",
    17 => "17 Repayments & transfers",
];

static EXPENSE_GROUPS: [ExpenseGroup; 3] = [
    ExpenseGroup {
        name: "personnel",
        label: "Personnel",
        indices: &[0, 1, 2],
    },
    ExpenseGroup {
        name: "outreach",
        label: "Outreach",
        indices: &[3, 4, 5, 6],
    },
    ExpenseGroup {
        name: "administration",
        label: "Administration",
        indices: &[9, 10, 11, 12, 13],
    },
];

/// Number of income categories
pub const INCOME_CATEGORY_COUNT: usize = 8;

static INCOME_CATEGORIES: [IncomeCategory; INCOME_CATEGORY_COUNT] = [
    IncomeCategory {
        key: "A",
        label: "A Tithes & monthly pledges",
    },
    IncomeCategory {
        key: "B",
        label: "B Worship offerings",
    },
    IncomeCategory {
        key: "C",
        label: "C Special offerings",
    },
    IncomeCategory {
        key: "D",
        label: "D Interest & miscellaneous income",
    },
    IncomeCategory {
        key: "E",
        label: "E Mission offerings",
    },
    IncomeCategory {
        key: "EE",
        label: "EE Dedicated-worker designated",
    },
    IncomeCategory {
        key: "F",
        label: "F Designated offerings",
    },
    IncomeCategory {
        key: "G",
        label: "G Temporary loans & transfers",
    },
];

/// Income keys summed into the contribution subtotal
pub const CONTRIBUTION_KEYS: [&str; 6] = ["A", "B", "C", "D", "E", "EE"];

/// Income keys for designated funds and transfers, shown after the subtotal
pub const DESIGNATED_KEYS: [&str; 2] = ["F", "G"];

/// All expense categories in registry order
pub fn expense_categories() -> &'static [ExpenseCategory] {
    &EXPENSE_CATEGORIES
}

/// All income categories in registry order
pub fn income_categories() -> &'static [IncomeCategory] {
    &INCOME_CATEGORIES
}

/// The expense groups in display order
pub fn expense_groups() -> &'static [ExpenseGroup] {
    &EXPENSE_GROUPS
}

/// Look up an expense category by index
pub fn expense_category(index: usize) -> LedgerResult<&'static ExpenseCategory> {
    EXPENSE_CATEGORIES.get(index).ok_or(LedgerError::OutOfRange {
        index,
        len: EXPENSE_CATEGORY_COUNT,
    })
}

/// Label of an expense category; fails if `index` is outside the registry
pub fn expense_category_label(index: usize) -> LedgerResult<&'static str> {
    expense_category(index).map(|c| c.label)
}

/// The group an expense index belongs to, if any
pub fn group_for_expense(index: usize) -> Option<&'static ExpenseGroup> {
    EXPENSE_GROUPS.iter().find(|g| g.contains(index))
}

/// Look up an expense group by name
pub fn find_expense_group(name: &str) -> Option<&'static ExpenseGroup> {
    EXPENSE_GROUPS.iter().find(|g| g.name == name)
}

/// Look up an income category by key
///
/// This is the single lookup behind both label display and income
/// aggregation, so an unknown key is treated the same way in both.
pub fn find_income_category(key: &str) -> Option<&'static IncomeCategory> {
    INCOME_CATEGORIES.iter().find(|c| c.key == key)
}

/// Position of an income key in the registry
pub fn income_category_position(key: &str) -> Option<usize> {
    INCOME_CATEGORIES.iter().position(|c| c.key == key)
}

/// Label of an income category
///
/// Unknown keys fall back to the key itself, so legacy or foreign records
/// still display something meaningful.
pub fn income_category_label(key: &str) -> &str {
    match find_income_category(key) {
        Some(category) => category.label,
        None => unknown_income_label(key),
    }
}

/// Fallback display for an income key missing from the registry
pub fn unknown_income_label(key: &str) -> &str {
    key
}

//! Aggregation engine
//!
//! Pure functions that turn a month's entries into per-category sums and
//! the subtotals built on them. Nothing is cached; every query recomputes
//! from the entries it is given.

use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::category::{
    self, CONTRIBUTION_KEYS, DESIGNATED_KEYS, EXPENSE_CATEGORY_COUNT, INCOME_CATEGORY_COUNT,
};
use crate::models::{
    Amount, ExpenseCategory, ExpenseEntry, ExpenseGroup, IncomeCategory, IncomeEntry,
};

/// One bucket per expense category, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSums([Amount; EXPENSE_CATEGORY_COUNT]);

impl Default for ExpenseSums {
    fn default() -> Self {
        Self([Amount::zero(); EXPENSE_CATEGORY_COUNT])
    }
}

impl ExpenseSums {
    /// Sum for one category index
    pub fn get(&self, index: usize) -> Option<Amount> {
        self.0.get(index).copied()
    }

    /// All buckets in registry order
    pub fn as_slice(&self) -> &[Amount] {
        &self.0
    }

    /// Buckets paired with their categories
    pub fn iter(&self) -> impl Iterator<Item = (&'static ExpenseCategory, Amount)> + '_ {
        category::expense_categories().iter().zip(self.0.iter().copied())
    }
}

/// Sum expense amounts into the 18 category buckets
///
/// Fails with `InvalidCategory` if any entry points outside the registry,
/// rather than letting it land in an unrelated bucket.
pub fn sum_by_expense_category<'a, I>(entries: I) -> LedgerResult<ExpenseSums>
where
    I: IntoIterator<Item = &'a ExpenseEntry>,
{
    let mut sums = ExpenseSums::default();

    for entry in entries {
        let bucket = usize::try_from(entry.category)
            .ok()
            .and_then(|index| sums.0.get_mut(index))
            .ok_or_else(|| {
                LedgerError::InvalidCategory(format!(
                    "expense entry {} references category index {} (expected 0..{})",
                    entry.id, entry.category, EXPENSE_CATEGORY_COUNT
                ))
            })?;
        *bucket += entry.amount;
    }

    Ok(sums)
}

/// Sum of all expense buckets
pub fn total_expense(sums: &ExpenseSums) -> Amount {
    sums.0.iter().sum()
}

/// Subtotals per expense group, in group display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotals(Vec<(&'static ExpenseGroup, Amount)>);

impl GroupTotals {
    /// Subtotal for a group by name
    pub fn get(&self, name: &str) -> Option<Amount> {
        self.0
            .iter()
            .find(|(group, _)| group.name == name)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static ExpenseGroup, Amount)> + '_ {
        self.0.iter().copied()
    }
}

/// Sum the buckets of each group's members
///
/// Ungrouped categories contribute to no subtotal.
pub fn group_totals(sums: &ExpenseSums) -> GroupTotals {
    GroupTotals(
        category::expense_groups()
            .iter()
            .map(|group| {
                let total = group
                    .indices
                    .iter()
                    .filter_map(|&index| sums.get(index))
                    .sum();
                (group, total)
            })
            .collect(),
    )
}

/// One bucket per known income key, in registry order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeSums {
    buckets: [Amount; INCOME_CATEGORY_COUNT],
    dropped: usize,
}

impl Default for IncomeSums {
    fn default() -> Self {
        Self {
            buckets: [Amount::zero(); INCOME_CATEGORY_COUNT],
            dropped: 0,
        }
    }
}

impl IncomeSums {
    /// Sum for a key, or `None` if the key is not in the registry
    pub fn get(&self, key: &str) -> Option<Amount> {
        category::income_category_position(key).and_then(|pos| self.buckets.get(pos).copied())
    }

    /// Buckets paired with their categories
    pub fn iter(&self) -> impl Iterator<Item = (&'static IncomeCategory, Amount)> + '_ {
        category::income_categories()
            .iter()
            .zip(self.buckets.iter().copied())
    }

    /// Number of entries left out because their key is unknown
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Sum income amounts into the 8 known key buckets
///
/// Entries with an unknown key are dropped: they appear in no bucket and
/// no total. This uses the same lookup as the label fallback.
pub fn sum_by_income_category<'a, I>(entries: I) -> IncomeSums
where
    I: IntoIterator<Item = &'a IncomeEntry>,
{
    let mut sums = IncomeSums::default();

    for entry in entries {
        let bucket = category::income_category_position(&entry.category)
            .and_then(|pos| sums.buckets.get_mut(pos));
        match bucket {
            Some(bucket) => *bucket += entry.amount,
            None => {
                warn!(id = %entry.id, key = %entry.category, "dropping income entry with unknown category");
                sums.dropped += 1;
            }
        }
    }

    sums
}

/// Sum over the contribution keys A, B, C, D, E and EE
pub fn contribution_set_total(sums: &IncomeSums) -> Amount {
    CONTRIBUTION_KEYS.iter().filter_map(|key| sums.get(key)).sum()
}

/// Sum over the designated/transfer keys F and G
pub fn designated_total(sums: &IncomeSums) -> Amount {
    DESIGNATED_KEYS.iter().filter_map(|key| sums.get(key)).sum()
}

/// Contribution subtotal plus F plus G
pub fn total_income(sums: &IncomeSums) -> Amount {
    contribution_set_total(sums) + designated_total(sums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Month};
    use rust_decimal_macros::dec;

    fn june() -> Month {
        Month::new(2025, 6).unwrap()
    }

    fn expense(index: i64, amount: i64) -> ExpenseEntry {
        Entry::new(index, Amount::from_units(amount), june())
    }

    fn income(key: &str, amount: i64) -> IncomeEntry {
        Entry::new(key.to_string(), Amount::from_units(amount), june())
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let sums = sum_by_expense_category(std::iter::empty()).unwrap();
        assert!(sums.as_slice().iter().all(|a| a.is_zero()));
        assert_eq!(sums.as_slice().len(), 18);
        assert!(total_expense(&sums).is_zero());
    }

    #[test]
    fn test_negative_amount_scenario() {
        let entries = vec![expense(0, -500)];
        let sums = sum_by_expense_category(&entries).unwrap();

        assert_eq!(sums.get(0), Some(Amount::from_units(-500)));
        assert_eq!(total_expense(&sums), Amount::from_units(-500));
        assert_eq!(total_expense(&sums).to_string(), "△¥500");
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut entries = vec![
            expense(0, 1200),
            expense(7, -300),
            expense(17, 45),
            Entry::new(3, Amount::from_decimal(dec!(0.1)), june()),
            Entry::new(3, Amount::from_decimal(dec!(0.2)), june()),
        ];
        let plain: Amount = entries.iter().map(|e| e.amount).sum();

        let forward = total_expense(&sum_by_expense_category(&entries).unwrap());
        entries.reverse();
        let backward = total_expense(&sum_by_expense_category(&entries).unwrap());

        assert_eq!(forward, plain);
        assert_eq!(backward, plain);
        assert_eq!(plain.value(), dec!(945.3));
    }

    #[test]
    fn test_out_of_range_category_fails() {
        for bad in [18, 99, -1] {
            let entries = vec![expense(1, 100), expense(bad, 50)];
            let err = sum_by_expense_category(&entries).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidCategory(_)));
        }
    }

    #[test]
    fn test_group_totals() {
        let entries = vec![
            expense(0, 100),
            expense(1, 200),
            expense(2, 300),
            expense(4, 50),
            expense(8, 1000),
            expense(13, 7),
            expense(15, 9),
        ];
        let sums = sum_by_expense_category(&entries).unwrap();
        let groups = group_totals(&sums);

        assert_eq!(groups.get("personnel"), Some(Amount::from_units(600)));
        assert_eq!(groups.get("outreach"), Some(Amount::from_units(50)));
        assert_eq!(groups.get("administration"), Some(Amount::from_units(7)));
        assert_eq!(groups.get("missions"), None);

        // Ungrouped 8 and 15 still count toward the grand total
        assert_eq!(total_expense(&sums), Amount::from_units(1666));
    }

    #[test]
    fn test_moving_entry_out_of_group() {
        let mut entries = vec![expense(0, 400), expense(1, 100)];
        let before = group_totals(&sum_by_expense_category(&entries).unwrap());
        assert_eq!(before.get("personnel"), Some(Amount::from_units(500)));

        entries[0].category = 8;
        let sums = sum_by_expense_category(&entries).unwrap();
        let after = group_totals(&sums);

        assert_eq!(after.get("personnel"), Some(Amount::from_units(100)));
        let grouped: Amount = after.iter().map(|(_, total)| total).sum();
        assert_eq!(grouped, Amount::from_units(100));
        assert_eq!(sums.get(8), Some(Amount::from_units(400)));
    }

    #[test]
    fn test_income_sums_and_subtotals() {
        let entries = vec![
            income("A", 10000),
            income("B", 2000),
            income("EE", 500),
            income("F", 3000),
            income("G", -1000),
        ];
        let sums = sum_by_income_category(&entries);

        assert_eq!(sums.get("A"), Some(Amount::from_units(10000)));
        assert_eq!(sums.get("C"), Some(Amount::zero()));
        assert_eq!(contribution_set_total(&sums), Amount::from_units(12500));
        assert_eq!(designated_total(&sums), Amount::from_units(2000));
        assert_eq!(total_income(&sums), Amount::from_units(14500));
        assert_eq!(sums.dropped(), 0);
    }

    #[test]
    fn test_unknown_income_key_is_dropped() {
        let entries = vec![
            income("A", 100),
            income("B", 100),
            income("C", 100),
            income("D", 100),
            income("E", 100),
            income("F", 100),
            income("G", 100),
            income("Z", 5000),
        ];
        let sums = sum_by_income_category(&entries);

        assert_eq!(sums.get("Z"), None);
        assert_eq!(sums.dropped(), 1);
        assert_eq!(total_income(&sums), Amount::from_units(700));
        assert_eq!(sums.iter().count(), 8);
    }
}

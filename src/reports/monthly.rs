//! Monthly summary report
//!
//! Gathers every figure shown for one month: per-category expense sums with
//! group subtotals, income by key with the contribution subtotal, the
//! carried-over balance, and the closing balance.

use std::io::Write;

use tracing::debug;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::category::{self, CONTRIBUTION_KEYS, DESIGNATED_KEYS};
use crate::models::{Amount, Month};
use crate::services::aggregation::{self, ExpenseSums, GroupTotals, IncomeSums};
use crate::services::carry_over::{self, CarryOverMode};
use crate::storage::LedgerStore;

const WIDTH: usize = 60;
const LABEL_WIDTH: usize = 40;

/// Every figure of the monthly summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    /// Selected month
    pub month: Month,
    /// Algorithm used for the carried-over balance
    pub carry_over_mode: CarryOverMode,
    /// Expense sums by category index
    pub expenses: ExpenseSums,
    /// Subtotals of the named expense groups
    pub group_totals: GroupTotals,
    /// Sum of all expense categories
    pub total_expense: Amount,
    /// Income sums by key
    pub income: IncomeSums,
    /// Sum over A through EE
    pub contribution_total: Amount,
    /// Contribution subtotal plus F and G
    pub total_income: Amount,
    /// Balance brought in from earlier months
    pub carried_over: Amount,
    /// Closing balance
    pub balance: Amount,
}

impl MonthlyReport {
    /// Compute the summary for `month`
    ///
    /// Fails with `InvalidCategory` if any of the month's expenses has an
    /// index outside the registry.
    pub fn generate(store: &LedgerStore, month: Month, mode: CarryOverMode) -> LedgerResult<Self> {
        let expenses = aggregation::sum_by_expense_category(store.expenses().for_month(month))?;
        let income = aggregation::sum_by_income_category(store.income().for_month(month));

        let group_totals = aggregation::group_totals(&expenses);
        let total_expense = aggregation::total_expense(&expenses);
        let contribution_total = aggregation::contribution_set_total(&income);
        let total_income = aggregation::total_income(&income);
        let carried_over = carry_over::carried_over(store, month, mode);
        let balance = total_income + carried_over - total_expense;

        debug!(%month, %mode, %total_expense, %total_income, %carried_over, "generated monthly report");

        Ok(Self {
            month,
            carry_over_mode: mode,
            expenses,
            group_totals,
            total_expense,
            income,
            contribution_total,
            total_income,
            carried_over,
            balance,
        })
    }

    /// Income total including the carried-over balance
    pub fn income_with_carry_over(&self) -> Amount {
        self.total_income + self.carried_over
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let fmt = |amount: Amount| settings.format_amount(amount);
        let mut output = String::new();

        output.push_str(&format!(
            "Monthly Summary: {} (carry-over: {})\n",
            self.month, self.carry_over_mode
        ));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');

        output.push_str("EXPENSES\n");
        for (cat, amount) in self.expenses.iter() {
            // A group's subtotal is printed just above its first member
            if let Some(group) = category::expense_groups()
                .iter()
                .find(|g| g.indices.first() == Some(&cat.index))
            {
                let total = self.group_totals.get(group.name).unwrap_or_default();
                output.push_str(&line(&format!("{} total", group.label), &fmt(total), 2));
            }
            output.push_str(&line(cat.label, &fmt(amount), 4));
        }
        output.push_str(&"-".repeat(WIDTH));
        output.push('\n');
        output.push_str(&line("Total expense", &fmt(self.total_expense), 0));
        output.push('\n');

        output.push_str("INCOME\n");
        for key in CONTRIBUTION_KEYS {
            output.push_str(&self.income_line(key, &fmt));
        }
        output.push_str(&line("A-EE subtotal", &fmt(self.contribution_total), 2));
        for key in DESIGNATED_KEYS {
            output.push_str(&self.income_line(key, &fmt));
        }
        output.push_str(&line("Carried over", &fmt(self.carried_over), 2));
        if self.income.dropped() > 0 {
            output.push_str(&format!(
                "  ({} entries with unknown income category not counted)\n",
                self.income.dropped()
            ));
        }
        output.push_str(&"-".repeat(WIDTH));
        output.push('\n');

        output.push_str(&line(
            "Total income (A-G + carry-over)",
            &fmt(self.income_with_carry_over()),
            0,
        ));
        output.push_str(&line("Total expense", &fmt(self.total_expense), 0));
        output.push_str(&"=".repeat(WIDTH));
        output.push('\n');
        output.push_str(&line("BALANCE", &fmt(self.balance), 0));

        output
    }

    fn income_line(&self, key: &str, fmt: &impl Fn(Amount) -> String) -> String {
        let amount = self.income.get(key).unwrap_or_default();
        line(category::income_category_label(key), &fmt(amount), 4)
    }

    /// Export the report as CSV
    ///
    /// One row per figure; amounts are plain decimals without symbol or
    /// marker.
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let month = self.month.to_string();
        let month = month.as_str();

        wtr.write_record(["Month", "Section", "Category", "Amount"])?;

        for (cat, amount) in self.expenses.iter() {
            write_row(&mut wtr, month, "expense", cat.label, amount)?;
        }
        for (group, total) in self.group_totals.iter() {
            write_row(&mut wtr, month, "expense-group", group.label, total)?;
        }
        write_row(&mut wtr, month, "expense-total", "", self.total_expense)?;

        for (cat, amount) in self.income.iter() {
            write_row(&mut wtr, month, "income", cat.label, amount)?;
        }
        write_row(&mut wtr, month, "income-subtotal", "A-EE", self.contribution_total)?;
        write_row(
            &mut wtr,
            month,
            "carried-over",
            self.carry_over_mode.as_str(),
            self.carried_over,
        )?;
        write_row(&mut wtr, month, "income-total", "", self.income_with_carry_over())?;
        write_row(&mut wtr, month, "balance", "", self.balance)?;

        wtr.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

fn write_row<W: Write>(
    wtr: &mut csv::Writer<W>,
    month: &str,
    section: &str,
    category: &str,
    amount: Amount,
) -> LedgerResult<()> {
    wtr.write_record([month, section, category, amount.to_plain_string().as_str()])?;
    Ok(())
}

fn line(label: &str, amount: &str, indent: usize) -> String {
    let width = LABEL_WIDTH.saturating_sub(indent);
    format!(
        "{}{:<width$} {:>15}\n",
        " ".repeat(indent),
        label,
        amount,
        width = width
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn sample_store() -> LedgerStore {
        let mut store = LedgerStore::in_memory();
        store.add_income("A", "10000", month("2025-05")).unwrap();
        store.add_expense(0, "3000", month("2025-05")).unwrap();

        store.add_income("A", "8000", month("2025-06")).unwrap();
        store.add_income("B", "1500", month("2025-06")).unwrap();
        store.add_income("F", "500", month("2025-06")).unwrap();
        store.add_income("Z", "999", month("2025-06")).unwrap();
        store.add_expense(0, "2000", month("2025-06")).unwrap();
        store.add_expense(1, "-500", month("2025-06")).unwrap();
        store.add_expense(10, "1200", month("2025-06")).unwrap();
        store.add_expense(16, "300", month("2025-06")).unwrap();
        store
    }

    #[test]
    fn test_generate_monthly_report() {
        let store = sample_store();
        let report = MonthlyReport::generate(&store, month("2025-06"), CarryOverMode::Cumulative).unwrap();

        assert_eq!(report.group_totals.get("personnel"), Some(Amount::from_units(1500)));
        assert_eq!(report.group_totals.get("administration"), Some(Amount::from_units(1200)));
        assert_eq!(report.total_expense, Amount::from_units(3000));
        assert_eq!(report.contribution_total, Amount::from_units(9500));
        assert_eq!(report.total_income, Amount::from_units(10000));
        assert_eq!(report.carried_over, Amount::from_units(7000));
        assert_eq!(report.income_with_carry_over(), Amount::from_units(17000));
        assert_eq!(report.balance, Amount::from_units(14000));
        assert_eq!(report.income.dropped(), 1);
    }

    #[test]
    fn test_balance_matches_carry_over_module() {
        let store = sample_store();
        for mode in [CarryOverMode::Cumulative, CarryOverMode::PreviousMonth] {
            let report = MonthlyReport::generate(&store, month("2025-06"), mode).unwrap();
            assert_eq!(
                report.balance,
                carry_over::balance(&store, month("2025-06"), mode).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_month() {
        let store = LedgerStore::in_memory();
        let report = MonthlyReport::generate(&store, month("2030-01"), CarryOverMode::Cumulative).unwrap();

        assert!(report.total_expense.is_zero());
        assert!(report.balance.is_zero());
        assert!(report.format_terminal(&Settings::default()).contains("BALANCE"));
    }

    #[test]
    fn test_invalid_index_fails_report() {
        let mut store = LedgerStore::in_memory();
        store.add_expense(18, "10", month("2025-06")).unwrap();

        let err = MonthlyReport::generate(&store, month("2025-06"), CarryOverMode::Cumulative).unwrap_err();
        assert!(err.is_invalid_category());
    }

    #[test]
    fn test_group_subtotal_precedes_first_member() {
        let store = sample_store();
        let report = MonthlyReport::generate(&store, month("2025-06"), CarryOverMode::Cumulative).unwrap();
        let text = report.format_terminal(&Settings::default());

        let subtotal = text.find("Personnel total").unwrap();
        let first = text.find("1 Pastoral stipend").unwrap();
        assert!(subtotal < first);

        let admin = text.find("Administration total").unwrap();
        let parsonage = text.find("9 Parsonage upkeep").unwrap();
        let missions = text.find("8 Missions").unwrap();
        assert!(missions < admin && admin < parsonage);

        assert!(text.contains("△¥500"));
        assert!(text.contains("¥14,000"));
    }

    #[test]
    fn test_same_value_edit_changes_no_figure() {
        let mut store = sample_store();
        let target = store.expenses().for_month(month("2025-06"))[1].clone();
        let income = store.income().for_month(month("2025-05"))[0].clone();

        let snapshot = |store: &LedgerStore| {
            [month("2025-05"), month("2025-06"), month("2025-07")]
                .into_iter()
                .map(|m| MonthlyReport::generate(store, m, CarryOverMode::Cumulative).unwrap())
                .collect::<Vec<_>>()
        };
        let before = snapshot(&store);

        let amount = target.amount.to_plain_string();
        store
            .edit(EntryKind::Expense, &target.id, &amount, target.month)
            .unwrap();
        let amount = income.amount.to_plain_string();
        store
            .edit(EntryKind::Income, &income.id, &amount, income.month)
            .unwrap();

        assert_eq!(snapshot(&store), before);
        assert_eq!(store.expenses().get(&target.id).map(|e| e.amount), Some(target.amount));
    }

    #[test]
    fn test_export_csv() {
        let store = sample_store();
        let report = MonthlyReport::generate(&store, month("2025-06"), CarryOverMode::Cumulative).unwrap();

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("Month,Section,Category,Amount\n"));
        assert!(csv.contains("2025-06,expense,2 Staff welfare,-500\n"));
        assert!(csv.contains("2025-06,expense-group,Personnel,1500\n"));
        assert!(csv.contains("2025-06,carried-over,cumulative,7000\n"));
        assert!(csv.contains("2025-06,balance,,14000\n"));
        // 18 expense rows, 3 groups, 8 income rows, 5 totals, 1 header
        assert_eq!(csv.lines().count(), 35);
    }
}

//! Category registry display
//!
//! Lists expense categories with their group membership, then income keys.

use crate::models::category;

/// Format the full registry
pub fn format_registry() -> String {
    let mut output = String::new();

    output.push_str("Expense categories:\n");
    for cat in category::expense_categories() {
        let group = category::group_for_expense(cat.index)
            .map(|g| format!("  [{}]", g.label))
            .unwrap_or_default();
        output.push_str(&format!("  {:>2}  {}{}\n", cat.index, cat.label, group));
    }

    output.push_str("\nExpense groups:\n");
    for group in category::expense_groups() {
        let members: Vec<String> = group.indices.iter().map(|i| i.to_string()).collect();
        output.push_str(&format!(
            "  {:<16} {}\n",
            group.label,
            members.join(", ")
        ));
    }

    output.push_str("\nIncome categories:\n");
    for cat in category::income_categories() {
        output.push_str(&format!("  {:<3} {}\n", cat.key, cat.label));
    }

    output
}

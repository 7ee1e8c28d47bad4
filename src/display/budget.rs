//! Budget and spending display

use super::format::{format_bar, format_percentage, separator, truncate, width};
use crate::services::budget::{BudgetStatus, SpendingReport};

const BAR_WIDTH: usize = 20;
const CATEGORY_MAX: usize = 24;

/// Format budget statuses, one line per budget with a usage bar
pub fn format_budget_summary(statuses: &[BudgetStatus]) -> String {
    if statuses.is_empty() {
        return "No budgets found.".to_string();
    }

    let name_width = statuses
        .iter()
        .map(|s| width(&truncate(&s.category, CATEGORY_MAX)))
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    for status in statuses {
        let name = truncate(&status.category, CATEGORY_MAX);
        let marker = if status.over_budget { "  OVER" } else { "" };
        output.push_str(&format!(
            "{}{}  {} {:>6}  {} / {}{}\n",
            name,
            " ".repeat(name_width - width(&name)),
            format_bar(status.percent_used, 100.0, BAR_WIDTH),
            format_percentage(status.percent_used),
            status.currency.format(status.spent),
            status.currency.format(status.limit),
            marker,
        ));
    }
    output
}

/// Format a spending report with totals and shares per category
pub fn format_spending(report: &SpendingReport, date_format: &str) -> String {
    let mut output = format!(
        "Spending {} to {} ({})\n",
        report.from.format(date_format),
        report.to.format(date_format),
        report.currency
    );

    if report.categories.is_empty() {
        output.push_str("No expenses in this period.\n");
        return output;
    }

    let name_width = report
        .categories
        .iter()
        .map(|c| width(&truncate(&c.category, CATEGORY_MAX)))
        .max()
        .unwrap_or(8)
        .max(8);
    let amounts: Vec<String> = report
        .categories
        .iter()
        .map(|c| report.currency.format(c.total))
        .collect();
    let total = report.currency.format(report.total);
    let amount_width = amounts
        .iter()
        .map(|a| width(a))
        .chain(std::iter::once(width(&total)))
        .max()
        .unwrap_or(0);

    for (category, amount) in report.categories.iter().zip(&amounts) {
        let name = truncate(&category.category, CATEGORY_MAX);
        output.push_str(&format!(
            "{}{}  {:>amount_width$}  {:>6}  ({} txn)\n",
            name,
            " ".repeat(name_width - width(&name)),
            amount,
            format_percentage(category.percentage),
            category.transaction_count,
            amount_width = amount_width,
        ));
    }

    output.push_str(&separator(name_width + amount_width + 2));
    output.push('\n');
    output.push_str(&format!(
        "{:<name_width$}  {:>amount_width$}\n",
        "Total",
        total,
        name_width = name_width,
        amount_width = amount_width,
    ));
    output
}

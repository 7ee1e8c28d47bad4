//! Budget and spending summaries
//!
//! Group-by-category reductions over the same transaction list the balance
//! aggregator reads. Only expenses count as spending; transfers move money
//! between accounts and never count against a budget.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::models::{Budget, Currency, Money, Transaction, TransactionKind};

/// First and last day of the calendar month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// How a budget stands for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetStatus {
    pub category: String,
    pub currency: Currency,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    pub percent_used: f64,
    pub over_budget: bool,
}

/// Spending against each budget during the month containing `month`
///
/// Budgets sharing a category and currency are merged and their limits summed.
pub fn budget_summary(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: NaiveDate,
) -> Vec<BudgetStatus> {
    let (from, to) = month_bounds(month);

    let mut limits: BTreeMap<(String, Currency), (String, Money)> = BTreeMap::new();
    for budget in budgets {
        let key = (budget.category.trim().to_lowercase(), budget.currency);
        limits
            .entry(key)
            .or_insert_with(|| (budget.category.trim().to_string(), Money::zero()))
            .1 += budget.amount;
    }

    limits
        .into_iter()
        .map(|((key, currency), (category, limit))| {
            let spent: Money = transactions
                .iter()
                .filter(|t| t.kind == TransactionKind::Expense)
                .filter(|t| t.currency == currency)
                .filter(|t| t.date >= from && t.date <= to)
                .filter(|t| t.category.trim().to_lowercase() == key)
                .map(|t| t.amount)
                .sum();

            let percent_used = if limit.is_positive() {
                spent.as_f64() / limit.as_f64() * 100.0
            } else if spent.is_positive() {
                100.0
            } else {
                0.0
            };

            BudgetStatus {
                category,
                currency,
                limit,
                spent,
                remaining: limit - spent,
                percent_used,
                over_budget: spent > limit,
            }
        })
        .collect()
}

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the report's total spending
    pub percentage: f64,
}

/// Expenses by category over a date range, in one currency
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub currency: Currency,
    pub categories: Vec<CategorySpending>,
    pub total: Money,
}

/// Group expenses in `[from, to]` by category, largest first
pub fn spending_by_category(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
    currency: Currency,
) -> SpendingReport {
    let mut by_category: BTreeMap<String, (String, Money, usize)> = BTreeMap::new();

    for txn in transactions {
        if txn.kind != TransactionKind::Expense || txn.currency != currency {
            continue;
        }
        if txn.date < from || txn.date > to {
            continue;
        }
        let name = txn.category.trim();
        let entry = by_category
            .entry(name.to_lowercase())
            .or_insert_with(|| (name.to_string(), Money::zero(), 0));
        entry.1 += txn.amount;
        entry.2 += 1;
    }

    let total: Money = by_category.values().map(|(_, amount, _)| *amount).sum();

    let mut categories: Vec<CategorySpending> = by_category
        .into_values()
        .map(|(category, amount, count)| CategorySpending {
            category,
            total: amount,
            transaction_count: count,
            percentage: if total.is_zero() {
                0.0
            } else {
                amount.as_f64() / total.as_f64() * 100.0
            },
        })
        .collect();

    categories.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });

    SpendingReport {
        from,
        to,
        currency,
        categories,
        total,
    }
}

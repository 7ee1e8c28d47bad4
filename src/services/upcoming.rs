//! Upcoming recurring items
//!
//! Dashboard view of which recurring items fall due soon.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{AccountId, Currency, Money, RecurringId, RecurringKind, RecurringTransaction};
use crate::services::recurrence::next_due;

/// A recurring item with its projected due date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingItem {
    pub recurring_id: RecurringId,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: RecurringKind,
    pub amount: Money,
    pub currency: Currency,
    pub account_id: AccountId,
    pub due: NaiveDate,
    pub days_until: i64,
}

/// Items whose next due date falls within `horizon_days` of `as_of`, soonest first
pub fn upcoming(
    recurring: &[RecurringTransaction],
    as_of: NaiveDate,
    horizon_days: u32,
) -> Vec<UpcomingItem> {
    let horizon_end = as_of
        .checked_add_days(Days::new(u64::from(horizon_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut items: Vec<UpcomingItem> = recurring
        .iter()
        .filter_map(|item| {
            let due = next_due(item, as_of);
            (due <= horizon_end).then(|| UpcomingItem {
                recurring_id: item.id,
                description: item.description.clone(),
                category: item.category.clone(),
                kind: item.kind,
                amount: item.amount,
                currency: item.currency,
                account_id: item.account_id,
                due,
                days_until: due.signed_duration_since(as_of).num_days(),
            })
        })
        .collect();

    items.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.description.cmp(&b.description)));
    items
}

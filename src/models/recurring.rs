//! Recurring transaction templates
//!
//! A recurring item only stores its anchor (`start_date`) and cadence. The
//! next due date is always projected on demand, see
//! [`crate::services::recurrence`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::currency::Currency;
use super::ids::{AccountId, RecurringId};
use super::money::Money;
use super::transaction::{Transaction, TransactionKind};

/// Cadence of a recurring item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parse a frequency (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// Transfers never recur, so recurring items have their own closed kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringKind {
    Income,
    Expense,
}

impl From<RecurringKind> for TransactionKind {
    fn from(kind: RecurringKind) -> Self {
        match kind {
            RecurringKind::Income => TransactionKind::Income,
            RecurringKind::Expense => TransactionKind::Expense,
        }
    }
}

impl fmt::Display for RecurringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TransactionKind::from(*self))
    }
}

/// Template for a transaction that repeats on a fixed cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    pub id: RecurringId,

    #[serde(default)]
    pub description: String,

    pub amount: Money,

    #[serde(rename = "type")]
    pub kind: RecurringKind,

    #[serde(default)]
    pub category: String,

    pub currency: Currency,

    pub account_id: AccountId,

    pub frequency: Frequency,

    /// Anchor of the series; the first occurrence
    pub start_date: NaiveDate,

    /// Fields this version does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecurringTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        description: impl Into<String>,
        kind: RecurringKind,
        amount: Money,
        currency: Currency,
        account_id: AccountId,
        category: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: RecurringId::new(),
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            currency,
            account_id,
            frequency,
            start_date,
            extra: Map::new(),
        }
    }

    /// Materialize one occurrence of this template as a transaction
    pub fn to_transaction(&self, date: NaiveDate) -> Transaction {
        let txn = match self.kind {
            RecurringKind::Income => Transaction::income(
                self.account_id,
                date,
                self.amount,
                self.currency,
                self.category.clone(),
            ),
            RecurringKind::Expense => Transaction::expense(
                self.account_id,
                date,
                self.amount,
                self.currency,
                self.category.clone(),
            ),
        };
        txn.with_description(self.description.clone())
    }

    pub fn validate(&self) -> Result<(), RecurringValidationError> {
        if !self.amount.is_positive() {
            return Err(RecurringValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(RecurringValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Validation errors for recurring items
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurringValidationError {
    NonPositiveAmount(Money),
    MissingCategory,
}

impl fmt::Display for RecurringValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Recurring amount must be positive (got {})", amount)
            }
            Self::MissingCategory => write!(f, "Recurring item needs a category"),
        }
    }
}

impl std::error::Error for RecurringValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> RecurringTransaction {
        RecurringTransaction::new(
            "Alquiler",
            RecurringKind::Expense,
            Money::from_cents(2_500_000),
            Currency::Dop,
            AccountId::new(),
            "Vivienda",
            Frequency::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("Weekly"), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("monthly"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse("annually"), Some(Frequency::Yearly));
        assert_eq!(Frequency::parse("daily"), None);
    }

    #[test]
    fn test_to_transaction() {
        let item = rent();
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let txn = item.to_transaction(date);

        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount, item.amount);
        assert_eq!(txn.account_id, item.account_id);
        assert_eq!(txn.date, date);
        assert_eq!(txn.description, "Alquiler");
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut item = rent();
        assert!(item.validate().is_ok());

        item.category.clear();
        assert_eq!(item.validate(), Err(RecurringValidationError::MissingCategory));

        item.amount = Money::zero();
        assert!(matches!(
            item.validate(),
            Err(RecurringValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_transfer_is_not_a_recurring_kind() {
        assert!(serde_json::from_str::<RecurringKind>("\"transfer\"").is_err());
    }

    #[test]
    fn test_stored_next_due_date_is_ignored() {
        let json = r#"{
            "id": "7a000000-0000-4000-8000-000000000001",
            "description": "Netflix",
            "amount": 15.99,
            "type": "expense",
            "category": "Entretenimiento",
            "currency": "USD",
            "accountId": "7a000000-0000-4000-8000-0000000000a1",
            "frequency": "monthly",
            "startDate": "2024-01-10",
            "nextDueDate": "1999-01-01"
        }"#;
        let item: RecurringTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(item.amount, Money::from_cents(1599));
        assert_eq!(item.start_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

        assert_eq!(
            crate::services::next_due(&item, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );

        // Passed through untouched, never read
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["nextDueDate"], "1999-01-01");
    }
}

//! Transaction model
//!
//! Transactions form a flat, append-only history. Balances are folded from
//! it on demand; nothing here carries a running total.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::currency::Currency;
use super::ids::{AccountId, TransactionId};
use super::money::Money;

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming into `account_id`
    Income,
    /// Money leaving `account_id`
    Expense,
    /// Money moving from `account_id` to `transfer_to_account_id`
    Transfer,
}

impl TransactionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Transfer => write!(f, "Transfer"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Always positive; the kind decides the direction
    pub amount: Money,

    /// Bucket the amount is applied to, independent of the account's currency
    pub currency: Currency,

    pub date: NaiveDate,

    /// Time of day, for display and same-day ordering only
    #[serde(
        default,
        with = "super::time_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<NaiveTime>,

    /// The account affected; the source account for transfers
    pub account_id: AccountId,

    /// Destination account, transfers only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to_account_id: Option<AccountId>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Reference to an uploaded receipt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,

    /// Fields this version does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    fn new(
        kind: TransactionKind,
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        currency: Currency,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            currency,
            date,
            time: None,
            account_id,
            transfer_to_account_id: None,
            category: String::new(),
            description: String::new(),
            receipt_url: None,
            extra: Map::new(),
        }
    }

    /// Create an income transaction
    pub fn income(
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        currency: Currency,
        category: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(TransactionKind::Income, account_id, date, amount, currency);
        txn.category = category.into();
        txn
    }

    /// Create an expense transaction
    pub fn expense(
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        currency: Currency,
        category: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(TransactionKind::Expense, account_id, date, amount, currency);
        txn.category = category.into();
        txn
    }

    /// Create a transfer between two accounts
    pub fn transfer(
        from: AccountId,
        to: AccountId,
        date: NaiveDate,
        amount: Money,
        currency: Currency,
    ) -> Self {
        let mut txn = Self::new(TransactionKind::Transfer, from, date, amount, currency);
        txn.transfer_to_account_id = Some(to);
        txn
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }

    /// Whether this transaction touches the given account on either side
    pub fn references(&self, account_id: AccountId) -> bool {
        self.account_id == account_id || self.transfer_to_account_id == Some(account_id)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        match self.kind {
            TransactionKind::Transfer => match self.transfer_to_account_id {
                None => Err(TransactionValidationError::MissingTransferDestination),
                Some(to) if to == self.account_id => {
                    Err(TransactionValidationError::TransferToSameAccount)
                }
                Some(_) => Ok(()),
            },
            TransactionKind::Income | TransactionKind::Expense => {
                if self.transfer_to_account_id.is_some() {
                    return Err(TransactionValidationError::DestinationOnNonTransfer);
                }
                if self.category.trim().is_empty() {
                    return Err(TransactionValidationError::MissingCategory);
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_transfer() {
            "Transfer"
        } else {
            self.category.as_str()
        };
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            label,
            self.currency.format(self.amount)
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    MissingTransferDestination,
    TransferToSameAccount,
    DestinationOnNonTransfer,
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive (got {})", amount)
            }
            Self::MissingTransferDestination => {
                write!(f, "Transfer must have a destination account")
            }
            Self::TransferToSameAccount => write!(f, "Cannot transfer to the same account"),
            Self::DestinationOnNonTransfer => {
                write!(f, "Only transfers may have a destination account")
            }
            Self::MissingCategory => write!(f, "Income and expense transactions need a category"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

//! Account model
//!
//! Represents bank accounts and credit cards. Balances are never stored on
//! the account; they are derived from the transaction history.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::currency::Currency;
use super::ids::AccountId;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    /// Payroll account
    Payroll,
    /// Savings account
    Savings,
    /// Checking account
    Checking,
    /// Business account
    Business,
    /// Credit card
    CreditCard,
}

impl AccountType {
    pub fn is_credit_card(&self) -> bool {
        matches!(self, Self::CreditCard)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "payroll" => Some(Self::Payroll),
            "savings" => Some(Self::Savings),
            "checking" => Some(Self::Checking),
            "business" => Some(Self::Business),
            "credit-card" | "credit_card" | "creditcard" | "credit" => Some(Self::CreditCard),
            _ => None,
        }
    }

    /// Wire tag as stored by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payroll => "payroll",
            Self::Savings => "savings",
            Self::Checking => "checking",
            Self::Business => "business",
            Self::CreditCard => "credit-card",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payroll => write!(f, "Payroll"),
            Self::Savings => write!(f, "Savings"),
            Self::Checking => write!(f, "Checking"),
            Self::Business => write!(f, "Business"),
            Self::CreditCard => write!(f, "Credit Card"),
        }
    }
}

/// A bank account or card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Display name (e.g., "Nómina Popular")
    pub name: String,

    /// Issuing bank or institution
    #[serde(default)]
    pub institution: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Settlement currency shown for the account
    pub currency: Currency,

    /// Masked account or card number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_brand: Option<String>,

    /// Cosmetic freeze flag for credit cards; balances ignore it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_frozen: Option<bool>,

    /// Fields this version does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    pub fn new(name: impl Into<String>, account_type: AccountType, currency: Currency) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            institution: String::new(),
            account_type,
            currency,
            account_number: None,
            card_brand: None,
            is_frozen: None,
            extra: Map::new(),
        }
    }

    /// Builder-style institution setter
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    pub fn is_frozen(&self) -> bool {
        self.account_type.is_credit_card() && self.is_frozen.unwrap_or(false)
    }

    /// Last four digits of the account number, masked for display
    pub fn masked_number(&self) -> Option<String> {
        let digits: String = self
            .account_number
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return None;
        }
        let tail = &digits[digits.len().saturating_sub(4)..];
        Some(format!("•••• {}", tail))
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.chars().count() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.chars().count()));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.account_type, self.currency)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

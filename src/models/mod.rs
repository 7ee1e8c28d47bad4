//! Core data models for fintrack
//!
//! Records mirror the persistence layer's schema (camelCase JSON) and use
//! closed enums for every tagged field, so anything that decodes is
//! well-formed for the balance and recurrence computations.

pub mod account;
pub mod budget;
pub mod currency;
pub mod ids;
pub mod money;
pub mod recurring;
pub mod task;
mod time_format;
pub mod transaction;

pub use account::{Account, AccountType, AccountValidationError};
pub use budget::Budget;
pub use currency::Currency;
pub use ids::{AccountId, BudgetId, RecurringId, TaskId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use recurring::{Frequency, RecurringKind, RecurringTransaction, RecurringValidationError};
pub use task::Task;
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};

//! fintrack - personal finance core for DOP/USD households
//!
//! Derives account balances from the full transaction history and projects
//! the next due date of recurring items. Nothing is stored incrementally:
//! both computations are pure functions over a caller-owned snapshot.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, recurring items, etc.)
//! - `storage`: JSON snapshot loading and atomic saves
//! - `services`: Balance aggregation, recurrence scheduling and summaries
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML balance sheet export
//! - `cli`: Command handlers for the `fintrack` binary
//! - `logging`: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fintrack::models::{Account, AccountType, Currency, Frequency, Money, Transaction};
//! use fintrack::services::{compute_balances, next_due_date};
//!
//! let checking = Account::new("Popular", AccountType::Checking, Currency::Dop);
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let salary = Transaction::income(checking.id, date, Money::from_cents(100_00), Currency::Dop, "Salario");
//!
//! let balances = compute_balances(&[checking.clone()], &[salary]);
//! assert_eq!(balances[&checking.id].balance_dop, Money::from_cents(100_00));
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
//! assert_eq!(
//!     next_due_date(start, Frequency::Monthly, as_of),
//!     NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
//! );
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod balance;
pub mod budget;
pub mod schedule;
pub mod task;

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Currency, Frequency};
use crate::storage::Snapshot;

pub use account::{handle_account_command, AccountCommands};
pub use balance::{handle_balances, BalanceArgs, OutputFormat};
pub use budget::{handle_budgets, handle_spending, BudgetsArgs, SpendingArgs};
pub use schedule::{handle_next_due, handle_upcoming, NextDueArgs, UpcomingArgs};
pub use task::{handle_task_command, TaskCommands};

/// What every snapshot-reading command needs
#[derive(Debug, Clone)]
pub struct Session {
    pub snapshot_path: PathBuf,
    pub settings: Settings,
}

impl Session {
    pub fn new(snapshot_path: PathBuf, settings: Settings) -> Self {
        Self {
            snapshot_path,
            settings,
        }
    }

    /// Load the snapshot, summarising skipped records on stderr
    pub fn load_snapshot(&self) -> FintrackResult<Snapshot> {
        let (snapshot, report) = Snapshot::load(&self.snapshot_path)?;
        if !report.is_clean() {
            eprintln!(
                "warning: skipped {} malformed record(s) in {}",
                report.skipped.len(),
                self.snapshot_path.display()
            );
        }
        Ok(snapshot)
    }

    pub fn save_snapshot(&self, snapshot: &Snapshot) -> FintrackResult<()> {
        snapshot.save(&self.snapshot_path)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.settings.date_format).to_string()
    }
}

/// Today's local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an optional date, defaulting to today
pub fn parse_date_or_today(s: Option<&str>) -> FintrackResult<NaiveDate> {
    s.map(parse_date).transpose().map(|d| d.unwrap_or_else(today))
}

/// Parse a `YYYY-MM` month into its first day
pub fn parse_month(s: &str) -> FintrackResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").map_err(|_| {
        FintrackError::Validation(format!("Invalid month: '{}'. Use YYYY-MM", s))
    })
}

pub fn parse_currency(s: &str) -> FintrackResult<Currency> {
    Currency::parse(s).ok_or_else(|| {
        let valid: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        FintrackError::Validation(format!(
            "Invalid currency: '{}'. Valid: {}",
            s,
            valid.join(", ")
        ))
    })
}

pub fn parse_frequency(s: &str) -> FintrackResult<Frequency> {
    Frequency::parse(s).ok_or_else(|| {
        FintrackError::Validation(format!(
            "Invalid frequency: '{}'. Valid: weekly, monthly, yearly",
            s
        ))
    })
}

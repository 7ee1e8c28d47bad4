//! Display formatting for terminal output

pub mod balance;
pub mod budget;
pub mod format;
pub mod schedule;

pub use balance::{format_balance_line, format_balance_table};
pub use budget::{format_budget_summary, format_spending};
pub use schedule::format_upcoming;

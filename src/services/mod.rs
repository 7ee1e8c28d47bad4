//! Service layer for fintrack
//!
//! Pure computations over a caller-owned snapshot (balances, recurrence,
//! budgets) plus the few operations that change a snapshot in place.

pub mod account;
pub mod balance;
pub mod budget;
pub mod recurrence;
pub mod task;
pub mod upcoming;

pub use account::{AccountService, RemovedAccount};
pub use balance::{compute_balances, total_by_currency, AccountBalance, BalanceLine, BalanceSheet, Balances};
pub use budget::{budget_summary, month_bounds, spending_by_category, BudgetStatus, CategorySpending, SpendingReport};
pub use recurrence::{next_due, next_due_date, next_due_date_today, occurrence, occurrences_between};
pub use task::{complete_task, CompletionEntry, TaskService};
pub use upcoming::{upcoming, UpcomingItem};

//! Task service
//!
//! Completing a task can record the payment or deposit it was a reminder for.

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{AccountId, Currency, Money, Task, TaskId, Transaction, TransactionKind};
use crate::storage::Snapshot;

/// Transaction to record when a task is completed
#[derive(Debug, Clone)]
pub struct CompletionEntry {
    pub kind: TransactionKind,
    pub amount: Money,
    pub currency: Currency,
    pub account_id: AccountId,
    pub category: String,
    /// Defaults to the task title
    pub description: Option<String>,
}

/// Mark a task completed, optionally producing the linked transaction
pub fn complete_task(
    task: &mut Task,
    entry: Option<CompletionEntry>,
    today: NaiveDate,
) -> FintrackResult<Option<Transaction>> {
    if task.is_completed {
        return Err(FintrackError::Validation(format!(
            "Task '{}' is already completed",
            task.title
        )));
    }

    let transaction = match entry {
        None => None,
        Some(entry) => {
            let txn = match entry.kind {
                TransactionKind::Income => Transaction::income(
                    entry.account_id,
                    today,
                    entry.amount,
                    entry.currency,
                    entry.category,
                ),
                TransactionKind::Expense => Transaction::expense(
                    entry.account_id,
                    today,
                    entry.amount,
                    entry.currency,
                    entry.category,
                ),
                TransactionKind::Transfer => {
                    return Err(FintrackError::Validation(
                        "A task can only record an income or an expense".into(),
                    ))
                }
            };
            let txn = txn.with_description(entry.description.unwrap_or_else(|| task.title.clone()));
            txn.validate()
                .map_err(|e| FintrackError::Validation(e.to_string()))?;
            Some(txn)
        }
    };

    task.is_completed = true;
    task.transaction_id = transaction.as_ref().map(|t| t.id);
    task.updated_at = Utc::now();

    Ok(transaction)
}

/// Service for task management
pub struct TaskService<'a> {
    snapshot: &'a mut Snapshot,
}

impl<'a> TaskService<'a> {
    pub fn new(snapshot: &'a mut Snapshot) -> Self {
        Self { snapshot }
    }

    /// Complete a task in the snapshot, appending any recorded transaction
    pub fn complete(
        &mut self,
        id: TaskId,
        entry: Option<CompletionEntry>,
        today: NaiveDate,
    ) -> FintrackResult<Option<Transaction>> {
        if let Some(entry) = &entry {
            if self.snapshot.account(entry.account_id).is_none() {
                return Err(FintrackError::account_not_found(entry.account_id.to_string()));
            }
        }

        let task = self
            .snapshot
            .task_mut(id)
            .ok_or_else(|| FintrackError::task_not_found(id.to_string()))?;

        let transaction = complete_task(task, entry, today)?;
        info!(
            task = %id,
            transaction = ?transaction.as_ref().map(|t| t.id.to_string()),
            "task completed"
        );

        if let Some(txn) = &transaction {
            self.snapshot.transactions.push(txn.clone());
        }
        Ok(transaction)
    }

    /// Incomplete tasks due before `as_of`, oldest first
    pub fn overdue(&self, as_of: NaiveDate) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .snapshot
            .tasks
            .iter()
            .filter(|t| t.is_overdue(as_of))
            .collect();
        tasks.sort_by_key(|t| t.due_date);
        tasks
    }
}

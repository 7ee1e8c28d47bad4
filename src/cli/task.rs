//! Task CLI commands

use clap::Subcommand;

use super::{parse_currency, today, Session};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, Task, TaskId, TransactionKind};
use crate::services::{AccountService, CompletionEntry, TaskService};
use crate::storage::Snapshot;

/// Task subcommands
#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks, oldest due date first
    List {
        /// Include completed tasks
        #[arg(short, long, conflicts_with = "overdue")]
        all: bool,
        /// Only incomplete tasks past their due date
        #[arg(short, long)]
        overdue: bool,
    },
    /// Mark a task completed, optionally recording a transaction
    Complete {
        /// Task title or ID
        task: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Amount (e.g., "1500" or "1,500.00")
        #[arg(short, long)]
        amount: Option<String>,
        /// DOP or USD (default: the account's currency)
        #[arg(short, long)]
        currency: Option<String>,
        /// Account name or ID
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Defaults to the task title
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Handle a task command
pub fn handle_task_command(session: &Session, cmd: TaskCommands) -> FintrackResult<()> {
    let mut snapshot = session.load_snapshot()?;

    match cmd {
        TaskCommands::List { all, overdue } => {
            let as_of = today();
            let tasks: Vec<Task> = if overdue {
                let service = TaskService::new(&mut snapshot);
                let overdue_tasks: Vec<Task> = service.overdue(as_of).into_iter().cloned().collect();
                overdue_tasks
            } else {
                let mut tasks: Vec<Task> = snapshot
                    .tasks
                    .iter()
                    .filter(|t| all || !t.is_completed)
                    .cloned()
                    .collect();
                tasks.sort_by_key(|t| t.due_date);
                tasks
            };

            if tasks.is_empty() {
                println!("No tasks found.");
            }
            for task in &tasks {
                let status = if task.is_completed {
                    "done"
                } else if task.is_overdue(as_of) {
                    "OVERDUE"
                } else {
                    ""
                };
                println!(
                    "{}  {}  {}  {}",
                    task.id,
                    session.format_date(task.due_date),
                    task.title,
                    status
                );
            }
        }

        TaskCommands::Complete {
            task,
            kind,
            amount,
            currency,
            account,
            category,
            description,
        } => {
            let task_id = find_task(&snapshot, &task)?;
            let entry = build_entry(&mut snapshot, kind, amount, currency, account, category, description)?;

            let transaction = TaskService::new(&mut snapshot).complete(task_id, entry, today())?;
            session.save_snapshot(&snapshot)?;

            println!("Completed task: {}", task);
            if let Some(txn) = transaction {
                println!("  Recorded: {}", txn);
                println!("  ID: {}", txn.id);
            }
        }
    }

    Ok(())
}

/// Resolve a task by ID or case-insensitive title
fn find_task(snapshot: &Snapshot, identifier: &str) -> FintrackResult<TaskId> {
    if let Ok(id) = identifier.parse::<TaskId>() {
        if snapshot.tasks.iter().any(|t| t.id == id) {
            return Ok(id);
        }
    }

    let needle = identifier.trim().to_lowercase();
    let mut matches = snapshot
        .tasks
        .iter()
        .filter(|t| t.title.trim().to_lowercase() == needle);

    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (Some(_), Some(_)) => Err(FintrackError::Validation(format!(
            "More than one task is titled '{}'; use its ID",
            identifier
        ))),
        (None, _) => Err(FintrackError::task_not_found(identifier)),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_entry(
    snapshot: &mut Snapshot,
    kind: Option<String>,
    amount: Option<String>,
    currency: Option<String>,
    account: Option<String>,
    category: Option<String>,
    description: Option<String>,
) -> FintrackResult<Option<CompletionEntry>> {
    let (kind, amount, account, category) = match (kind, amount, account, category) {
        (None, None, None, None) => {
            if currency.is_some() || description.is_some() {
                return Err(FintrackError::Validation(
                    "--currency and --description need --type, --amount, --account and --category".into(),
                ));
            }
            return Ok(None);
        }
        (Some(kind), Some(amount), Some(account), Some(category)) => (kind, amount, account, category),
        _ => {
            return Err(FintrackError::Validation(
                "Recording a transaction needs --type, --amount, --account and --category".into(),
            ))
        }
    };

    let kind = TransactionKind::parse(&kind)
        .filter(|k| *k != TransactionKind::Transfer)
        .ok_or_else(|| {
            FintrackError::Validation(format!("Invalid type: '{}'. Valid: income, expense", kind))
        })?;

    let amount = Money::parse(&amount).map_err(|e| {
        FintrackError::Validation(format!("Invalid amount: '{}'. {}", amount, e))
    })?;

    let account_id = AccountService::new(snapshot).resolve(&account)?;
    let currency = match currency {
        Some(currency) => parse_currency(&currency)?,
        None => snapshot
            .account(account_id)
            .map(|a| a.currency)
            .unwrap_or_default(),
    };

    Ok(Some(CompletionEntry {
        kind,
        amount,
        currency,
        account_id,
        category,
        description,
    }))
}

//! Account service
//!
//! Lookup and removal of accounts inside a loaded snapshot. Removing an
//! account also removes everything that depends on it, so no transaction or
//! recurring item is left pointing at an account that no longer exists.

use tracing::info;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Account, AccountId, RecurringTransaction, Transaction};
use crate::services::balance::BalanceSheet;
use crate::storage::Snapshot;

/// Service for account management
pub struct AccountService<'a> {
    snapshot: &'a mut Snapshot,
}

/// Everything dropped by [`AccountService::remove`]
#[derive(Debug, Clone)]
pub struct RemovedAccount {
    pub account: Account,
    pub transactions: Vec<Transaction>,
    pub recurring: Vec<RecurringTransaction>,
    /// Tasks whose transaction link was cleared
    pub unlinked_tasks: usize,
    /// Undecodable transactions or recurring items that named the account
    pub unreadable_records: usize,
}

impl<'a> AccountService<'a> {
    pub fn new(snapshot: &'a mut Snapshot) -> Self {
        Self { snapshot }
    }

    /// Find an account by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> Option<&Account> {
        let needle = identifier.trim().to_lowercase();
        if let Some(account) = self
            .snapshot
            .accounts
            .iter()
            .find(|a| a.name.trim().to_lowercase() == needle)
        {
            return Some(account);
        }

        let id = identifier.trim().parse::<AccountId>().ok()?;
        self.snapshot.account(id)
    }

    /// Resolve an identifier to an account ID or fail with `NotFound`
    pub fn resolve(&self, identifier: &str) -> FintrackResult<AccountId> {
        self.find(identifier)
            .map(|a| a.id)
            .ok_or_else(|| FintrackError::account_not_found(identifier))
    }

    /// Remove an account together with its transactions and recurring items
    ///
    /// Transfers that touch the account on either side are removed. Tasks that
    /// were linked to a removed transaction stay, but lose the link.
    pub fn remove(&mut self, id: AccountId) -> FintrackResult<RemovedAccount> {
        let position = self
            .snapshot
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| FintrackError::account_not_found(id.to_string()))?;
        let account = self.snapshot.accounts.remove(position);

        let (transactions, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.snapshot.transactions)
            .into_iter()
            .partition(|t| t.references(id));
        self.snapshot.transactions = kept;

        let (recurring, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.snapshot.recurring)
            .into_iter()
            .partition(|r| r.account_id == id);
        self.snapshot.recurring = kept;

        let unreadable_records = self.snapshot.unparsed.remove_referencing(id);

        let mut unlinked_tasks = 0;
        for task in &mut self.snapshot.tasks {
            let linked = task
                .transaction_id
                .is_some_and(|txn_id| transactions.iter().any(|t| t.id == txn_id));
            if linked {
                task.transaction_id = None;
                task.updated_at = chrono::Utc::now();
                unlinked_tasks += 1;
            }
        }

        info!(
            account = %account.id,
            name = %account.name,
            transactions = transactions.len(),
            recurring = recurring.len(),
            unlinked_tasks,
            unreadable_records,
            "account removed"
        );

        Ok(RemovedAccount {
            account,
            transactions,
            recurring,
            unlinked_tasks,
            unreadable_records,
        })
    }

    /// Balance sheet over the whole snapshot
    pub fn balance_sheet(&self) -> BalanceSheet {
        BalanceSheet::build(&self.snapshot.accounts, &self.snapshot.transactions)
    }
}

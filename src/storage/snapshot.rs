//! Snapshot of one user's records
//!
//! The snapshot is the data-loading boundary. Every record is decoded and
//! validated on its own; a record that fails is logged and skipped so one
//! corrupt row never takes the rest of the dashboard down with it.
//!
//! Skipped records are still owned by the user. They are kept verbatim, along
//! with any top-level fields this version does not know, and written back on
//! save so a write command never drops data it could not read.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::file_io::{read_json_value, write_json_atomic};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{
    Account, AccountId, Budget, RecurringTransaction, Task, TaskId, Transaction,
};

/// All collections for one user, owned by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    #[serde(rename = "recurringTransactions")]
    pub recurring: Vec<RecurringTransaction>,
    pub tasks: Vec<Task>,
    pub budgets: Vec<Budget>,

    #[serde(skip)]
    pub unparsed: Unparsed,
}

/// Raw JSON carried through a load/save cycle without being interpreted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Unparsed {
    /// Top-level fields other than the known collections
    pub fields: Map<String, Value>,
    /// Records that failed to decode, by collection key, in document order
    pub records: BTreeMap<&'static str, Vec<Value>>,
}

impl Unparsed {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.records.values().all(Vec::is_empty)
    }

    /// Drop raw transactions and recurring items that name `account_id`
    ///
    /// Returns how many were dropped.
    pub fn remove_referencing(&mut self, account_id: AccountId) -> usize {
        let id = account_id.as_uuid().to_string();
        let references = |record: &Value| {
            ["accountId", "transferToAccountId"].iter().any(|key| {
                record
                    .get(*key)
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.eq_ignore_ascii_case(&id))
            })
        };

        let mut removed = 0;
        for key in ["transactions", "recurringTransactions"] {
            if let Some(records) = self.records.get_mut(key) {
                let before = records.len();
                records.retain(|record| !references(record));
                removed += before - records.len();
            }
        }
        removed
    }
}

/// A record dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub collection: &'static str,
    pub index: usize,
    pub reason: String,
}

/// What happened while loading a snapshot
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    fn skip(&mut self, collection: &'static str, index: usize, reason: &str) {
        warn!(collection, index, %reason, "skipping malformed record");
        self.skipped.push(SkippedRecord {
            collection,
            index,
            reason: reason.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl Snapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> FintrackResult<(Self, LoadReport)> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a snapshot document record by record
    pub fn from_value(value: Value) -> FintrackResult<(Self, LoadReport)> {
        let Value::Object(mut root) = value else {
            return Err(FintrackError::Storage(
                "Snapshot must be a JSON object".into(),
            ));
        };

        let mut report = LoadReport::default();
        let mut unparsed = Unparsed::default();

        let mut seen = HashSet::new();
        let accounts = decode_collection(&mut root, &mut unparsed, "accounts", &mut report, |a: &Account| {
            a.validate().map_err(|e| e.to_string())?;
            if seen.insert(a.id) {
                Ok(())
            } else {
                Err(format!("duplicate account id {}", a.id))
            }
        })?;
        let transactions = decode_collection(&mut root, &mut unparsed, "transactions", &mut report, |t: &Transaction| {
            t.validate().map_err(|e| e.to_string())
        })?;
        let recurring = decode_collection(
            &mut root,
            &mut unparsed,
            "recurringTransactions",
            &mut report,
            |r: &RecurringTransaction| r.validate().map_err(|e| e.to_string()),
        )?;
        let tasks = decode_collection(&mut root, &mut unparsed, "tasks", &mut report, |_: &Task| Ok(()))?;
        let budgets = decode_collection(&mut root, &mut unparsed, "budgets", &mut report, |b: &Budget| {
            if b.amount.is_negative() {
                Err(format!("budget limit cannot be negative ({})", b.amount))
            } else {
                Ok(())
            }
        })?;

        unparsed.fields = root;

        let snapshot = Self {
            accounts,
            transactions,
            recurring,
            tasks,
            budgets,
            unparsed,
        };

        debug!(
            accounts = snapshot.accounts.len(),
            transactions = snapshot.transactions.len(),
            recurring = snapshot.recurring.len(),
            tasks = snapshot.tasks.len(),
            budgets = snapshot.budgets.len(),
            skipped = report.skipped.len(),
            unknown_fields = snapshot.unparsed.fields.len(),
            "snapshot decoded"
        );

        Ok((snapshot, report))
    }

    /// Load a snapshot file; a missing file is an empty snapshot
    pub fn load<P: AsRef<Path>>(path: P) -> FintrackResult<(Self, LoadReport)> {
        let path = path.as_ref();
        match read_json_value(path)? {
            Some(value) => Self::from_value(value),
            None => {
                debug!(path = %path.display(), "snapshot file not found; starting empty");
                Ok((Self::default(), LoadReport::default()))
            }
        }
    }

    /// The document to persist: decoded records first, then anything unparsed
    pub fn to_value(&self) -> FintrackResult<Value> {
        let mut value = serde_json::to_value(self)?;
        let Value::Object(root) = &mut value else {
            return Err(FintrackError::Storage(
                "Snapshot did not serialize to a JSON object".into(),
            ));
        };

        for (key, records) in &self.unparsed.records {
            if let Some(Value::Array(items)) = root.get_mut(*key) {
                items.extend(records.iter().cloned());
            }
        }
        for (key, field) in &self.unparsed.fields {
            root.entry(key.clone()).or_insert_with(|| field.clone());
        }

        Ok(value)
    }

    /// Save the snapshot atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FintrackResult<()> {
        let path = path.as_ref();
        write_json_atomic(path, &self.to_value()?)?;
        info!(path = %path.display(), "snapshot saved");
        Ok(())
    }

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

fn decode_collection<T, F>(
    root: &mut Map<String, Value>,
    unparsed: &mut Unparsed,
    key: &'static str,
    report: &mut LoadReport,
    mut validate: F,
) -> FintrackResult<Vec<T>>
where
    T: DeserializeOwned,
    F: FnMut(&T) -> Result<(), String>,
{
    let items = match root.remove(key) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(FintrackError::Storage(format!(
                "Snapshot field '{}' must be an array",
                key
            )))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let decoded = T::deserialize(&item)
            .map_err(|e| e.to_string())
            .and_then(|record| validate(&record).map(|()| record));

        match decoded {
            Ok(record) => records.push(record),
            Err(reason) => {
                report.skip(key, index, &reason);
                unparsed.records.entry(key).or_default().push(item);
            }
        }
    }

    Ok(records)
}

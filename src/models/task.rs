//! Task model
//!
//! Tasks are reminders with a due date. Completing one may record a
//! transaction, which is linked back through `transaction_id`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{TaskId, TransactionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    pub due_date: NaiveDate,

    #[serde(
        default,
        with = "super::time_format",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<NaiveTime>,

    #[serde(default)]
    pub is_completed: bool,

    /// Transaction recorded when the task was completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Fields this version does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            title: title.into(),
            due_date,
            time: None,
            is_completed: false,
            transaction_id: None,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    /// Incomplete and due before `as_of`
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_completed && self.due_date < as_of
    }
}

//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its persisted shape.
//! - Validate and normalize descriptions at write time.
//! - Rebuild well-typed tasks from loosely typed stored records.
//!
//! # Invariants
//! - `created_at` is truncated to milliseconds so it survives a JSON round trip.
//! - Descriptions written through `normalize_description` are trimmed and non-empty.

use crate::model::wire::{parse_timestamp, serialize_iso_millis, text_or_empty, truthy};
use crate::util::id::generate_task_id;
use chrono::{DateTime, SubsecRound, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable task identifier, `"{epoch_ms}-{random}"` for generated ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// Validation failures for task writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty after trimming whitespace.
    EmptyDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Trims `description`, rejecting whitespace-only input.
pub fn normalize_description(description: &str) -> Result<String, TaskValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// One todo item.
///
/// Persisted as `{id, description, completed, createdAt}`. Deserialization
/// never rejects a record for a bad field; see `StoredTask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTask")]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub completed: bool,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task with a generated id.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyDescription` for whitespace-only input.
    pub fn create(description: &str, now: DateTime<Utc>) -> Result<Self, TaskValidationError> {
        let description = normalize_description(description)?;
        Ok(Self::with_id(generate_task_id(now), description, now))
    }

    /// Creates a pending task with a caller-provided id. No validation.
    pub fn with_id(id: TaskId, description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description: description.into(),
            completed: false,
            created_at: created_at.trunc_subsecs(3),
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Loosely typed stored task, as found in persisted JSON.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    completed: Value,
    #[serde(default)]
    created_at: Value,
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        let created_at = parse_timestamp(&stored.created_at).unwrap_or_else(Utc::now);
        // An empty id marks the record for `assign_missing_ids`.
        let id = match stored.id {
            Value::String(id) if !id.trim().is_empty() => TaskId(id),
            Value::Number(number) => TaskId(number.to_string()),
            _ => TaskId(String::new()),
        };

        Self {
            id,
            description: text_or_empty(stored.description),
            completed: truthy(&stored.completed),
            created_at: created_at.trunc_subsecs(3),
        }
    }
}

/// Gives every task reconstructed without an id a generated one.
///
/// Returns how many tasks were repaired. Callers must persist the list when
/// this is non-zero, otherwise the next load generates different ids.
pub(crate) fn assign_missing_ids(tasks: &mut [Task], now: DateTime<Utc>) -> usize {
    let mut repaired = 0;
    for task in tasks.iter_mut().filter(|task| task.id.0.is_empty()) {
        task.id = generate_task_id(now);
        warn!(
            "event=task_reconstruct module=model status=repaired field=id new_id={}",
            task.id
        );
        repaired += 1;
    }
    repaired
}

/// Derived counters over the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    /// Counts `tasks` in a single pass.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let (total, completed) = tasks.into_iter().fold((0, 0), |(total, completed), task| {
            (total + 1, completed + usize::from(task.completed))
        });
        Self {
            total,
            completed,
            pending: total - completed,
        }
    }
}

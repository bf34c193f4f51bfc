//! Task repository.
//!
//! # Responsibility
//! - Own the ordered task list (insertion order is display order).
//! - Apply add/toggle/edit/delete/clear-completed and persist after each.
//! - Derive stats and filtered views on demand.
//!
//! # Invariants
//! - The list is loaded once, at construction.
//! - `toggle_completion` on an unknown id is a silent no-op; `edit` on an
//!   unknown id is `RepoError::NotFound`.
//! - `delete` and `clear_completed` persist even when nothing was removed.
//! - A failed persist leaves the in-memory mutation in place (no rollback).

use crate::model::filter::Filter;
use crate::model::task::{assign_missing_ids, normalize_description, Task, TaskId, TaskStats};
use crate::repo::{RepoError, RepoResult};
use crate::storage::{KeyValueStore, StorageAdapter, StorageResult};
use chrono::Utc;
use log::{debug, info, warn};

/// Storage key used when the caller does not configure one.
pub const DEFAULT_TASKS_KEY: &str = "dashboard_tasks";

/// In-memory task list persisted under one storage key.
pub struct TaskRepository<S> {
    adapter: StorageAdapter<S, Vec<Task>>,
    tasks: Vec<Task>,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Loads the task list stored under `key`.
    ///
    /// Absent or unparsable data yields an empty list. Stored tasks without
    /// an id get one, and the repaired list is written back so the id
    /// survives the next load.
    ///
    /// # Errors
    /// - Backend read failures. A failed write-back is only logged.
    pub fn load(store: S, key: impl Into<String>) -> StorageResult<Self> {
        let adapter = StorageAdapter::new(store, key);
        let mut tasks: Vec<Task> = adapter.load(Vec::new())?;
        let repaired = assign_missing_ids(&mut tasks, Utc::now());
        let repo = Self { adapter, tasks };

        if repaired > 0 {
            if let Err(err) = repo.persist() {
                warn!(
                    "event=task_repo_repair module=repo status=error key={} repaired={repaired} error={err}",
                    repo.adapter.key()
                );
            }
        }
        info!(
            "event=task_repo_load module=repo status=ok key={} count={} repaired={repaired}",
            repo.adapter.key(),
            repo.tasks.len()
        );
        Ok(repo)
    }

    /// Appends a new pending task and returns its id.
    ///
    /// # Errors
    /// - `RepoError::Validation` for whitespace-only input; nothing is written.
    /// - `RepoError::Storage` when the write fails.
    pub fn add(&mut self, description: &str) -> RepoResult<TaskId> {
        let task = Task::create(description, Utc::now())?;
        let id = task.id.clone();
        self.tasks.push(task);
        self.persist()?;
        debug!("event=task_add module=repo status=ok task_id={id}");
        Ok(id)
    }

    /// Flips `completed` on the first task with `id`.
    ///
    /// Returns `false`, without writing, when no task matches.
    pub fn toggle_completion(&mut self, id: &TaskId) -> RepoResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_toggle module=repo status=noop task_id={id}");
            return Ok(false);
        };
        task.toggle();
        let completed = task.completed;
        self.persist()?;
        debug!("event=task_toggle module=repo status=ok task_id={id} completed={completed}");
        Ok(true)
    }

    /// Replaces the description of the first task with `id`.
    ///
    /// # Errors
    /// - `RepoError::Validation` for whitespace-only input.
    /// - `RepoError::NotFound` when no task matches; nothing is written.
    /// - `RepoError::Storage` when the write fails.
    pub fn edit(&mut self, id: &TaskId, new_description: &str) -> RepoResult<()> {
        let description = normalize_description(new_description)?;
        let task = self
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))?;
        task.description = description;
        self.persist()?;
        debug!("event=task_edit module=repo status=ok task_id={id}");
        Ok(())
    }

    /// Removes every task with `id` and returns how many were removed.
    pub fn delete(&mut self, id: &TaskId) -> RepoResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        let removed = before - self.tasks.len();
        self.persist()?;
        debug!("event=task_delete module=repo status=ok task_id={id} removed={removed}");
        Ok(removed)
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> RepoResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        self.persist()?;
        debug!("event=task_clear_completed module=repo status=ok removed={removed}");
        Ok(removed)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Tasks matching `filter`, in insertion order.
    pub fn list_by_filter(&self, filter: Filter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &TaskId) -> Option<Task> {
        self.tasks.iter().find(|task| &task.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn persist(&self) -> StorageResult<()> {
        self.adapter.save(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::{TaskRepository, DEFAULT_TASKS_KEY};
    use crate::model::filter::Filter;
    use crate::model::task::{TaskId, TaskStats, TaskValidationError};
    use crate::repo::RepoError;
    use crate::storage::{KeyValueStore, MemoryKvStore, StorageError};

    fn stored(store: &MemoryKvStore) -> Option<String> {
        store.get_item(DEFAULT_TASKS_KEY).unwrap()
    }

    #[test]
    fn add_rejects_blank_descriptions_without_writing() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        for blank in ["", "   ", "\n\t"] {
            let err = repo.add(blank).unwrap_err();
            assert!(matches!(
                err,
                RepoError::Validation(TaskValidationError::EmptyDescription)
            ));
        }
        assert!(repo.is_empty());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn toggle_unknown_id_is_silent_and_skips_write() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        assert!(!repo.toggle_completion(&TaskId::new("missing")).unwrap());
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn edit_unknown_id_is_not_found_and_skips_write() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        let err = repo.edit(&TaskId::new("missing"), "text").unwrap_err();
        assert!(matches!(err, RepoError::NotFound(id) if id.as_str() == "missing"));
        assert_eq!(stored(&store), None);
    }

    #[test]
    fn edit_validates_before_lookup() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        let err = repo.edit(&TaskId::new("missing"), "  ").unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn delete_unknown_id_still_persists() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        assert_eq!(repo.delete(&TaskId::new("missing")).unwrap(), 0);
        assert_eq!(stored(&store).as_deref(), Some("[]"));
    }

    #[test]
    fn list_by_filter_partitions_tasks_in_insertion_order() {
        let store = MemoryKvStore::new();
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();
        let first = repo.add("first").unwrap();
        let second = repo.add("second").unwrap();
        let third = repo.add("third").unwrap();
        repo.toggle_completion(&second).unwrap();

        let ids = |filter: Filter| -> Vec<TaskId> {
            repo.list_by_filter(filter)
                .into_iter()
                .map(|task| task.id)
                .collect()
        };
        assert_eq!(ids(Filter::All), vec![first.clone(), second.clone(), third.clone()]);
        assert_eq!(ids(Filter::Completed), vec![second]);
        assert_eq!(ids(Filter::Pending), vec![first, third]);
    }

    #[test]
    fn storage_failure_propagates_from_mutations() {
        let store = MemoryKvStore::with_quota(64);
        let mut repo = TaskRepository::load(&store, DEFAULT_TASKS_KEY).unwrap();

        let err = repo.add(&"x".repeat(128)).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(stored(&store), None);
        assert_eq!(
            repo.stats(),
            TaskStats {
                total: 1,
                completed: 0,
                pending: 1
            }
        );
    }
}

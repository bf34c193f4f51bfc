//! Dashboard use-case service.
//!
//! # Responsibility
//! - Hold the only application state (filter selection, last notes save).
//! - Route one user action to one repository operation.
//! - Build views from fresh repository reads.
//!
//! # Invariants
//! - Both repositories share one backend, each bound to its own key.
//! - `render` never reuses a previously built view.
//! - Validation failures carry the message shown to the user.

use crate::model::filter::Filter;
use crate::model::notes::NotesRecord;
use crate::model::task::TaskId;
use crate::repo::notes_repo::NotesRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::view::{DashboardView, TaskRow};
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use crate::util::time_ago::format_time_ago;
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPTY_TASK_MESSAGE: &str = "Please enter a non-empty task.";
const EMPTY_EDIT_MESSAGE: &str = "Task cannot be empty.";

/// Presentation state owned by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub filter: Filter,
    pub notes_saved_at: Option<DateTime<Utc>>,
}

/// One user action routed into the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    AddTask(String),
    ToggleTask(TaskId),
    EditTask(TaskId, String),
    DeleteTask(TaskId),
    /// Raw filter input; unknown names select `Filter::All`.
    SetFilter(String),
    ClearCompleted,
    SaveNotes(String),
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    TaskAdded(TaskId),
    /// `found` is false when the id matched nothing.
    TaskToggled { found: bool },
    TaskEdited,
    TasksDeleted(usize),
    FilterChanged(Filter),
    CompletedCleared(usize),
    NotesSaved(NotesRecord),
}

#[derive(Debug)]
pub enum DashboardError {
    /// Rejected input, with the message to show the user.
    Validation(&'static str),
    TaskNotFound(TaskId),
    Storage(StorageError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => f.write_str(message),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for DashboardError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl DashboardError {
    fn from_repo(err: RepoError, validation_message: &'static str) -> Self {
        match err {
            RepoError::Validation(_) => Self::Validation(validation_message),
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Storage(err) => Self::Storage(err),
        }
    }
}

/// Task list and notes behind one storage backend.
pub struct Dashboard<S> {
    tasks: TaskRepository<S>,
    notes: NotesRepository<S>,
    state: AppState,
}

impl<S: KeyValueStore + Clone> Dashboard<S> {
    /// Loads both repositories from `store`.
    ///
    /// # Errors
    /// - Backend read failures. Corrupt stored values load as empty.
    pub fn open(
        store: S,
        tasks_key: impl Into<String>,
        notes_key: impl Into<String>,
    ) -> StorageResult<Self> {
        let tasks = TaskRepository::load(store.clone(), tasks_key)?;
        let notes = NotesRepository::new(store, notes_key);
        let state = AppState {
            filter: Filter::default(),
            notes_saved_at: notes.load()?.saved_at,
        };
        info!(
            "event=dashboard_open module=service status=ok task_count={} notes_saved={}",
            tasks.len(),
            state.notes_saved_at.is_some()
        );
        Ok(Self {
            tasks,
            notes,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tasks(&self) -> &TaskRepository<S> {
        &self.tasks
    }

    pub fn notes(&self) -> &NotesRepository<S> {
        &self.notes
    }

    /// Applies one action.
    ///
    /// # Errors
    /// - `DashboardError::Validation` for blank task text.
    /// - `DashboardError::TaskNotFound` when editing an unknown task.
    /// - `DashboardError::Storage` when persisting fails.
    pub fn apply(&mut self, action: DashboardAction) -> Result<ActionOutcome, DashboardError> {
        match action {
            DashboardAction::AddTask(text) => self
                .tasks
                .add(&text)
                .map(ActionOutcome::TaskAdded)
                .map_err(|err| DashboardError::from_repo(err, EMPTY_TASK_MESSAGE)),
            DashboardAction::ToggleTask(id) => self
                .tasks
                .toggle_completion(&id)
                .map(|found| ActionOutcome::TaskToggled { found })
                .map_err(|err| DashboardError::from_repo(err, EMPTY_EDIT_MESSAGE)),
            DashboardAction::EditTask(id, text) => self
                .tasks
                .edit(&id, &text)
                .map(|()| ActionOutcome::TaskEdited)
                .map_err(|err| DashboardError::from_repo(err, EMPTY_EDIT_MESSAGE)),
            DashboardAction::DeleteTask(id) => self
                .tasks
                .delete(&id)
                .map(ActionOutcome::TasksDeleted)
                .map_err(|err| DashboardError::from_repo(err, EMPTY_EDIT_MESSAGE)),
            DashboardAction::SetFilter(input) => {
                self.state.filter = Filter::from_input(&input);
                Ok(ActionOutcome::FilterChanged(self.state.filter))
            }
            DashboardAction::ClearCompleted => self
                .tasks
                .clear_completed()
                .map(ActionOutcome::CompletedCleared)
                .map_err(|err| DashboardError::from_repo(err, EMPTY_EDIT_MESSAGE)),
            DashboardAction::SaveNotes(text) => {
                let record = self.notes.save(&text)?;
                self.state.notes_saved_at = record.saved_at;
                Ok(ActionOutcome::NotesSaved(record))
            }
        }
    }

    /// Builds the current view from fresh repository reads.
    ///
    /// # Errors
    /// - Backend read failures while loading notes.
    pub fn render(&self, now: DateTime<Utc>) -> StorageResult<DashboardView> {
        let notes = self.notes.load()?;
        let saved_at = notes.saved_at.or(self.state.notes_saved_at);
        let tasks = self
            .tasks
            .list_by_filter(self.state.filter)
            .into_iter()
            .map(TaskRow::from)
            .collect();

        Ok(DashboardView {
            filter: self.state.filter,
            tasks,
            stats: self.tasks.stats(),
            notes_content: notes.content,
            notes_status: format_time_ago(saved_at, now),
        })
    }
}

//! Repositories owning persisted dashboard state.
//!
//! # Responsibility
//! - Own the in-memory task list and notes record.
//! - Persist through a `StorageAdapter` after every mutation.
//!
//! # Invariants
//! - Consumers receive copies (filtered vectors, records), never the backing
//!   collection.
//! - Validation failures never mutate or persist anything.

use crate::model::task::{TaskId, TaskValidationError};
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod notes_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    NotFound(TaskId),
    Storage(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

//! Core logic for the taskdash task/notes dashboard.
//! Front-ends only talk to `Dashboard` and the re-exported types.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod util;

pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::{Filter, UnknownFilter};
pub use model::notes::NotesRecord;
pub use model::task::{Task, TaskId, TaskStats, TaskValidationError};
pub use repo::notes_repo::{NotesRepository, DEFAULT_NOTES_KEY};
pub use repo::task_repo::{TaskRepository, DEFAULT_TASKS_KEY};
pub use repo::{RepoError, RepoResult};
pub use service::dashboard::{ActionOutcome, AppState, Dashboard, DashboardAction, DashboardError};
pub use service::view::{DashboardView, TaskRow};
pub use storage::{
    KeyValueStore, MemoryKvStore, SqliteKvStore, StorageAdapter, StorageError, StorageResult,
};
pub use util::id::generate_task_id;
pub use util::time_ago::format_time_ago;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Key-value storage contracts, backends and the typed storage adapter.
//!
//! # Responsibility
//! - Define the synchronous string key-value store the repositories persist to.
//! - Provide SQLite (durable) and in-memory backends with optional quotas.
//! - Convert typed values to/from JSON text through `StorageAdapter`.
//!
//! # Invariants
//! - Writes either replace the whole value under a key or fail without change.
//! - Backend write failures (including quota) always reach the caller.
//! - Unparsable stored values never leave `StorageAdapter::load`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod adapter;
pub mod memory_store;
pub mod sqlite_store;

pub use adapter::StorageAdapter;
pub use memory_store::MemoryKvStore;
pub use sqlite_store::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a key-value backend or by value encoding.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite backend failure.
    Sqlite(rusqlite::Error),
    /// The database file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The write would grow the store past its capacity limit.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    /// The value could not be encoded as JSON text.
    Serialize(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes required, {quota_bytes} allowed"
            ),
            Self::Serialize(err) => write!(f, "failed to serialize stored value: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::QuotaExceeded { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous string key-value store.
///
/// Methods take `&self`: one backend is shared by every adapter bound to it,
/// and all access happens on a single thread.
pub trait KeyValueStore {
    /// Returns the text stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// Bytes one entry counts against a quota.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

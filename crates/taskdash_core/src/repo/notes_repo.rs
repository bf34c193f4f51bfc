//! Notes repository.
//!
//! # Responsibility
//! - Persist the single notes record with its save timestamp.
//!
//! # Invariants
//! - Every save fully replaces the stored record.
//! - Absent or unparsable notes read as empty and never saved.

use crate::model::notes::NotesRecord;
use crate::storage::{KeyValueStore, StorageAdapter, StorageResult};
use chrono::Utc;
use log::debug;

/// Storage key used when the caller does not configure one.
pub const DEFAULT_NOTES_KEY: &str = "dashboard_notes";

pub struct NotesRepository<S> {
    adapter: StorageAdapter<S, NotesRecord>,
}

impl<S: KeyValueStore> NotesRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            adapter: StorageAdapter::new(store, key),
        }
    }

    /// Stores `content` stamped with the current time and returns the record.
    ///
    /// # Errors
    /// - Any backend write failure, including quota exhaustion.
    pub fn save(&self, content: &str) -> StorageResult<NotesRecord> {
        let record = NotesRecord::saved(content, Utc::now());
        self.adapter.save(&record)?;
        debug!(
            "event=notes_save module=repo status=ok content_len={}",
            record.content.len()
        );
        Ok(record)
    }

    /// Returns the stored record, or an empty never-saved record.
    pub fn load(&self) -> StorageResult<NotesRecord> {
        self.adapter.load(NotesRecord::default())
    }

    /// Forgets the stored notes.
    pub fn clear(&self) -> StorageResult<()> {
        self.adapter.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::{NotesRepository, DEFAULT_NOTES_KEY};
    use crate::model::notes::NotesRecord;
    use crate::storage::{KeyValueStore, MemoryKvStore};

    #[test]
    fn load_without_saved_notes_is_empty() {
        let store = MemoryKvStore::new();
        let repo = NotesRepository::new(&store, DEFAULT_NOTES_KEY);
        assert_eq!(repo.load().unwrap(), NotesRecord::default());
    }

    #[test]
    fn save_replaces_previous_record() {
        let store = MemoryKvStore::new();
        let repo = NotesRepository::new(&store, DEFAULT_NOTES_KEY);

        repo.save("first draft").unwrap();
        let saved = repo.save("second draft").unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.content, "second draft");
        assert!(loaded.saved_at.is_some());
    }

    #[test]
    fn corrupt_notes_read_as_empty() {
        let store = MemoryKvStore::new();
        store.set_item(DEFAULT_NOTES_KEY, "{\"content\":").unwrap();
        let repo = NotesRepository::new(&store, DEFAULT_NOTES_KEY);
        assert_eq!(repo.load().unwrap(), NotesRecord::default());
    }

    #[test]
    fn clear_forgets_notes() {
        let store = MemoryKvStore::new();
        let repo = NotesRepository::new(&store, DEFAULT_NOTES_KEY);
        repo.save("temp").unwrap();

        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), NotesRecord::default());
    }
}

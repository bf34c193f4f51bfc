//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist string values in the `kv_store` table of a migrated connection.
//! - Enforce an optional byte quota over all stored entries.
//!
//! # Invariants
//! - Each key maps to at most one row; writes are upserts.
//! - A rejected write leaves the stored row untouched.

use super::{entry_size, KeyValueStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Key-value store over a connection returned by `db::open_db*`.
#[derive(Debug, Clone, Copy)]
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
    quota_bytes: Option<usize>,
}

impl<'conn> SqliteKvStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            quota_bytes: None,
        }
    }

    /// Same store, rejecting writes that grow it past `quota_bytes`.
    pub fn with_quota(conn: &'conn Connection, quota_bytes: usize) -> Self {
        Self {
            conn,
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Total bytes stored, excluding `skip_key` when given.
    fn stored_bytes(&self, skip_key: Option<&str>) -> StorageResult<usize> {
        let bytes: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(length(CAST(key AS BLOB)) + length(CAST(value AS BLOB))), 0)
             FROM kv_store
             WHERE ?1 IS NULL OR key <> ?1;",
            params![skip_key],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(bytes).unwrap_or(0))
    }

    /// Total bytes counted against the quota.
    pub fn used_bytes(&self) -> StorageResult<usize> {
        self.stored_bytes(None)
    }
}

impl KeyValueStore for SqliteKvStore<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.stored_bytes(Some(key))? + entry_size(key, value);
            if required_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

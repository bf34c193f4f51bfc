//! Ordered schema steps for the key-value database.
//!
//! The applied step is recorded in `PRAGMA user_version`. Each step runs in
//! its own transaction together with its version bump, so an interrupted
//! upgrade resumes from the last committed step.

use crate::storage::{StorageError, StorageResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs, strictly increasing by version.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Schema version recorded in the database file.
pub fn schema_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `StorageError::UnsupportedSchemaVersion` when the file was written by a
///   newer build; nothing is touched in that case.
/// - `StorageError::Sqlite` when a step fails; earlier steps stay applied.
pub fn upgrade(conn: &mut Connection) -> StorageResult<u32> {
    let found = schema_version(conn)?;
    let latest = latest_version();
    if found > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        });
    }

    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;
        info!("event=db_migrate module=db status=ok from={found} to={version}");
    }

    Ok(latest)
}

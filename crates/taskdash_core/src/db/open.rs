use super::migrations::upgrade;
use super::KV_TABLE;
use crate::storage::{StorageError, StorageResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the database file at `path`, ready for `SqliteKvStore`.
///
/// The parent directory must already exist.
pub fn open_db(path: impl AsRef<Path>) -> StorageResult<Connection> {
    let path = path.as_ref();
    prepare("file", || Connection::open(path))
}

/// Private in-memory database, discarded when the connection drops.
pub fn open_db_in_memory() -> StorageResult<Connection> {
    prepare("memory", Connection::open_in_memory)
}

fn prepare(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<Connection> {
    let started_at = Instant::now();
    let result = connect().map_err(StorageError::from).and_then(|mut conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let version = upgrade(&mut conn)?;
        let keys = count_keys(&conn)?;
        Ok((conn, version, keys))
    });

    match result {
        Ok((conn, version, keys)) => {
            info!(
                "event=kv_open module=db status=ok mode={mode} schema_version={version} keys={keys} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=kv_open module=db status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn count_keys(conn: &Connection) -> StorageResult<u64> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {KV_TABLE};"), [], |row| {
        row.get(0)
    })?;
    Ok(u64::try_from(count).unwrap_or(0))
}

use rusqlite::Connection;
use taskdash_core::db::migrations::{latest_version, schema_version, upgrade};
use taskdash_core::db::{open_db, open_db_in_memory, KV_TABLE};
use taskdash_core::{KeyValueStore, SqliteKvStore, StorageError};

#[test]
fn in_memory_database_is_at_latest_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, KV_TABLE);
}

#[test]
fn reopening_file_keeps_stored_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdash.sqlite3");

    let first = open_db(&path).unwrap();
    SqliteKvStore::new(&first).set_item("k", "1").unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second).unwrap(), latest_version());
    assert_eq!(
        SqliteKvStore::new(&second).get_item("k").unwrap().as_deref(),
        Some("1")
    );
}

#[test]
fn upgrade_is_a_no_op_at_latest_version() {
    let mut conn = open_db_in_memory().unwrap();
    SqliteKvStore::new(&conn).set_item("k", "v").unwrap();

    assert_eq!(upgrade(&mut conn).unwrap(), latest_version());
    assert_eq!(
        SqliteKvStore::new(&conn).get_item("k").unwrap().as_deref(),
        Some("v")
    );
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let untouched = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&untouched).unwrap(), 999);
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists, "expected table `{table_name}` to exist");
}

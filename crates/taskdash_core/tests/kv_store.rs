use serde_json::json;
use taskdash_core::db::{open_db, open_db_in_memory};
use taskdash_core::{KeyValueStore, SqliteKvStore, StorageAdapter, StorageError};

#[test]
fn sqlite_store_set_get_remove() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);

    assert_eq!(store.get_item("k").unwrap(), None);
    store.set_item("k", "first").unwrap();
    store.set_item("k", "second").unwrap();
    assert_eq!(store.get_item("k").unwrap().as_deref(), Some("second"));

    store.remove_item("k").unwrap();
    store.remove_item("k").unwrap();
    assert_eq!(store.get_item("k").unwrap(), None);
}

#[test]
fn sqlite_store_quota_rejects_growth_and_keeps_old_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::with_quota(&conn, 20);

    store.set_item("a", "123456789").unwrap();
    store.set_item("b", "12345678").unwrap();
    assert_eq!(store.used_bytes().unwrap(), 19);

    let err = store.set_item("b", "1234567890").unwrap_err();
    match err {
        StorageError::QuotaExceeded {
            key,
            required_bytes,
            quota_bytes,
        } => {
            assert_eq!(key, "b");
            assert_eq!(required_bytes, 21);
            assert_eq!(quota_bytes, 20);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.get_item("b").unwrap().as_deref(), Some("12345678"));

    store.set_item("b", "1234567").unwrap();
}

#[test]
fn quota_counts_utf8_bytes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::with_quota(&conn, 4);

    store.set_item("k", "é").unwrap();
    assert_eq!(store.used_bytes().unwrap(), 3);
    assert!(store.set_item("k", "éé").is_err());
}

#[test]
fn adapter_falls_back_on_invalid_json_in_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::new(&conn);
    store.set_item("tasks", "{not valid json").unwrap();

    let adapter: StorageAdapter<_, Vec<String>> = StorageAdapter::new(store, "tasks");
    let default = vec!["fallback".to_string()];
    assert_eq!(adapter.load(default.clone()).unwrap(), default);
}

#[test]
fn values_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskdash.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let adapter = StorageAdapter::new(SqliteKvStore::new(&conn), "payload");
        adapter.save(&json!({ "answer": 42 })).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let adapter: StorageAdapter<_, serde_json::Value> =
        StorageAdapter::new(SqliteKvStore::new(&conn), "payload");
    assert_eq!(adapter.load(json!(null)).unwrap(), json!({ "answer": 42 }));
}

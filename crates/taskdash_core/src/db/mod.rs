//! SQLite file behind `SqliteKvStore`.
//!
//! Every connection handed out here has the `kv_store` table at the latest
//! schema version. Failures surface as `StorageError` so callers deal with a
//! single error type from open to write.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding one row per storage key.
pub const KV_TABLE: &str = "kv_store";

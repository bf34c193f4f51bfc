//! Typed JSON gateway over a key-value store.
//!
//! # Responsibility
//! - Serialize one value shape to JSON text under one bound key.
//! - Substitute a caller default for absent or unreadable values.
//!
//! # Invariants
//! - `save` propagates every backend failure unchanged.
//! - `load` swallows parse failures with a `warn` event; backend read
//!   failures are still propagated.

use super::{KeyValueStore, StorageError, StorageResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Storage gateway for values of shape `T`, bound to a single key.
pub struct StorageAdapter<S, T> {
    store: S,
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<S, T> StorageAdapter<S, T>
where
    S: KeyValueStore,
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _value: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes `value` as JSON text, replacing whatever the key held.
    ///
    /// # Errors
    /// - `StorageError::Serialize` when `value` cannot be encoded.
    /// - Any backend error, including `StorageError::QuotaExceeded`.
    pub fn save(&self, value: &T) -> StorageResult<()> {
        let text = serde_json::to_string(value).map_err(StorageError::Serialize)?;
        self.store.set_item(&self.key, &text)?;
        debug!(
            "event=storage_save module=storage status=ok key={} bytes={}",
            self.key,
            text.len()
        );
        Ok(())
    }

    /// Reads the bound key, falling back to `default` when it is absent or
    /// cannot be parsed as `T`.
    pub fn load(&self, default: T) -> StorageResult<T> {
        let Some(text) = self.store.get_item(&self.key)? else {
            debug!(
                "event=storage_load module=storage status=absent key={}",
                self.key
            );
            return Ok(default);
        };

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(
                    "event=storage_load module=storage status=fallback key={} error_code=parse_failed error={}",
                    self.key, err
                );
                Ok(default)
            }
        }
    }

    /// Removes the bound key from the store.
    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove_item(&self.key)
    }
}

//! Notes blob model.

use crate::model::wire::{parse_timestamp, serialize_opt_iso_millis};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Freeform notes text plus the time it was last saved.
///
/// Persisted as `{content, savedAt}` where `savedAt` is ISO-8601 or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredNotes")]
pub struct NotesRecord {
    pub content: String,
    #[serde(serialize_with = "serialize_opt_iso_millis")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl NotesRecord {
    /// Record for `content` saved at `now`.
    pub fn saved(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            saved_at: Some(now.trunc_subsecs(3)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredNotes {
    #[serde(default)]
    content: Value,
    #[serde(default)]
    saved_at: Value,
}

impl From<StoredNotes> for NotesRecord {
    fn from(stored: StoredNotes) -> Self {
        let content = match stored.content {
            Value::String(content) => content,
            _ => String::new(),
        };
        Self {
            content,
            saved_at: parse_timestamp(&stored.saved_at),
        }
    }
}

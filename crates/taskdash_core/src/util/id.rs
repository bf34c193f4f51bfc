//! Task identifier generation.

use crate::model::task::TaskId;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Size of the random suffix space.
const RANDOM_SPACE: u32 = 1_000_000;

/// Generates `"{epoch_ms}-{random}"`.
///
/// Ids from distinct milliseconds never collide; within one millisecond the
/// random suffix keeps collisions negligible at single-user scale.
pub fn generate_task_id(now: DateTime<Utc>) -> TaskId {
    let random_part = rand::thread_rng().gen_range(0..RANDOM_SPACE);
    TaskId::new(format!("{}-{random_part}", now.timestamp_millis()))
}

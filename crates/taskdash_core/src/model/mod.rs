//! Domain model for the task list and the notes blob.
//!
//! # Responsibility
//! - Define the records the repositories own and persist.
//! - Own the persisted JSON layout and its lenient reconstruction rules.
//!
//! # Invariants
//! - `Task::id` and `Task::created_at` never change after creation.
//! - Stats are derived on demand and never stored.

pub mod filter;
pub mod notes;
pub mod task;
mod wire;

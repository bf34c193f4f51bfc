//! Identifier and time display helpers.

pub mod id;
pub mod time_ago;

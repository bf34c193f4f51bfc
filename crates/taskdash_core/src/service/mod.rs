//! Dashboard use-case layer.
//!
//! # Responsibility
//! - Route user actions into the repositories.
//! - Keep front-ends decoupled from storage details.

pub mod dashboard;
pub mod view;

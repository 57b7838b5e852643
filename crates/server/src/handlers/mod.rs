//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for the `draftsmith-server`.

pub mod contract;
pub mod general;

// Re-export all handlers so the router can reach them under `handlers::`.
pub use contract::*;
pub use general::*;

// Shared items used by the handler modules.
use super::{errors::AppError, state::AppState};

//! # General Route Handlers
//!
//! The root and health check endpoints.

use crate::types::HealthResponse;
use axum::Json;

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "draftsmith server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

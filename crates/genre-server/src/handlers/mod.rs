//! HTTP route handlers for the classifier server.

pub mod predict;

use axum::Json;
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness check; reachable only once the artifacts are loaded.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

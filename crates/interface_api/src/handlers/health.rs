//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    /// Version of the active rate configuration
    pub rate_version: String,
    pub dynamic_pricing: bool,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (includes the active rate snapshot)
///
/// A running service always holds a validated snapshot, so readiness only
/// reports which one is active.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let snapshot = state.engine.store().snapshot();

    Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rate_version: snapshot.version().to_string(),
        dynamic_pricing: snapshot.is_dynamic_pricing_enabled(),
    })
}

//! Rate table handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use domain_pricing::RatesSnapshot;
use serde::Serialize;
use tracing::info;

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadResponse {
    pub version: String,
    pub previous_version: String,
}

/// Lists base rates and coverage tiers of the active configuration
pub async fn get_rates(State(state): State<AppState>) -> Json<RatesSnapshot> {
    Json(state.engine.get_rates())
}

/// Re-reads the rate file and swaps in the new configuration
///
/// On any failure the previous configuration stays active.
///
/// This endpoint performs no authentication or authorization. Expose it only
/// on a trusted network, or put an authenticating proxy in front of it.
pub async fn reload_rates(State(state): State<AppState>) -> Result<Json<ReloadResponse>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let path = state.config.rates_path.clone();

    let previous = tokio::task::spawn_blocking(move || engine.store().reload_from_file(&path))
        .await
        .map_err(|e| ApiError::Internal(format!("reload task failed: {}", e)))??;

    let version = state.engine.store().version();
    info!(
        version = %version,
        previous_version = %previous.version(),
        "Rates reloaded via API"
    );

    Ok(Json(ReloadResponse {
        version,
        previous_version: previous.version().to_string(),
    }))
}

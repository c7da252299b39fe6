//! Quote handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use domain_pricing::{Quote, QuoteRequest};
use tracing::debug;

use crate::{error::ApiError, AppState};

/// Calculates a premium quote
///
/// Rating is CPU-bound and short, so it runs inline on the request task.
pub async fn calculate_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected quote request body");
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let quote = state.engine.calculate_quote(&request)?;
    Ok(Json(quote))
}

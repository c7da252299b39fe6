//! HTTP API Layer
//!
//! This crate exposes the rating engine over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: quote calculation, rate inspection and reload, health
//! - **Middleware**: request ids, tracing, request logging
//! - **Error Handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(engine, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_pricing::RatingEngine;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{health, quote, rates};
use crate::middleware::{request_logging_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RatingEngine>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// No route is authenticated, including `POST /api/v1/rates/reload`.
/// Authentication is left to the deployment, e.g. a gateway in front of
/// the service.
///
/// # Arguments
///
/// * `engine` - Rating engine over the active rate configuration
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(engine: Arc<RatingEngine>, config: ApiConfig) -> Router {
    let state = AppState { engine, config };
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/quote", post(quote::calculate_quote))
        .route("/rates", get(rates::get_rates))
        // Unauthenticated: operators must restrict access at the network edge
        .route("/rates/reload", post(rates::reload_rates));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

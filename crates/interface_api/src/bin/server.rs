//! Pricing Engine - API Server Binary
//!
//! This binary loads the rate configuration and serves the quote API.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin pricing-engine
//!
//! # Run with environment variables
//! PRICING_PORT=8003 PRICING_RATES_PATH=data/pricing-rules.json cargo run --bin pricing-engine
//! ```
//!
//! # Environment Variables
//!
//! * `PRICING_HOST` - Server host (default: 0.0.0.0)
//! * `PRICING_PORT` - Server port (default: 8003)
//! * `PRICING_RATES_PATH` - Rate configuration file (default: data/pricing-rules.json)
//! * `PRICING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `PRICING_LOG_FORMAT` - `json` or `pretty` (default: json)
//! * `PRICING_DYNAMIC_RATES` - Force dynamic pricing on or off (default: as configured)
//! * `PRICING_PREMIUM_FLOOR` - `none` or `zero` (default: none)

use std::net::SocketAddr;
use std::sync::Arc;

use domain_pricing::{RateConfigurationStore, RatingEngine};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::create_router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration and rate tables, and starts the
/// HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The rate configuration file is missing or invalid
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    init_tracing(&config.log_level, config.log_format);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        rates_path = %config.rates_path.display(),
        "Starting pricing engine"
    );

    let store = RateConfigurationStore::load_from_file(&config.rates_path, config.dynamic_rates)?;
    let engine = RatingEngine::new(Arc::new(store)).with_premium_floor(config.premium_floor);

    let app = create_router(Arc::new(engine), config.clone());

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight quote requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

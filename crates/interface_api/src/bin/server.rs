//! HubSpot Connector - API Server Binary
//!
//! This binary starts the HTTP API server for the HubSpot connector.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin connector-api
//!
//! # Run with environment variables
//! HUBSPOT_PRIVATE_APP_TOKEN=pat-na1-... CONNECTOR_PORT=8080 cargo run --bin connector-api
//! ```
//!
//! # Environment Variables
//!
//! * `CONNECTOR_HOST` - Server host (default: 0.0.0.0)
//! * `CONNECTOR_PORT` - Server port (default: 8080)
//! * `HUBSPOT_PRIVATE_APP_TOKEN` - HubSpot private app token for outbound calls
//! * `HUBSPOT_WEBHOOK_SECRET` - Webhook signature secret (verification skipped if unset)
//! * `HUBSPOT_BASE_URL` - HubSpot API base URL (default: https://api.hubapi.com)
//! * `RATE_LIMIT` - Rate-limit budget "<count>/<window>" (default: 100/minute)
//! * `CONNECTOR_REQUEST_TIMEOUT_SECS` - Outbound request timeout (default: 30)
//! * `CONNECTOR_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use infra_hubspot::{HubSpotConfig, HubSpotGateway, DEFAULT_BASE_URL};
use interface_api::{
    config::{ApiConfig, RateLimit},
    create_router,
};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, constructs the HubSpot
/// gateway, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - The rate-limit budget string is malformed
/// - The HTTP client cannot be constructed
/// - The server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting HubSpot Connector API Server"
    );

    // Validate the rate-limit budget; enforcement lives in front of us
    let rate_limit: RateLimit = config.rate_limit.parse()?;
    tracing::info!(%rate_limit, "Rate-limit budget configured (enforced upstream)");

    if config.hubspot_private_app_token.is_empty() {
        tracing::warn!("HUBSPOT_PRIVATE_APP_TOKEN is not set; outbound HubSpot calls will fail");
    }

    // Construct the HubSpot gateway
    let gateway = HubSpotGateway::new(
        HubSpotConfig::new(config.hubspot_private_app_token.clone())
            .base_url(config.hubspot_base_url.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs)),
    )?;

    // Create the API router
    let app = create_router(Arc::new(gateway), config.clone());

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Tries the `CONNECTOR_`-prefixed form first, then falls back to the
/// individual variables (matching the names HubSpot integrations
/// conventionally use) with defaults.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("CONNECTOR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("CONNECTOR_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        hubspot_base_url: std::env::var("HUBSPOT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        hubspot_private_app_token: std::env::var("HUBSPOT_PRIVATE_APP_TOKEN")
            .unwrap_or_default(),
        hubspot_webhook_secret: std::env::var("HUBSPOT_WEBHOOK_SECRET").ok(),
        rate_limit: std::env::var("RATE_LIMIT").unwrap_or_else(|_| "100/minute".to_string()),
        request_timeout_secs: std::env::var("CONNECTOR_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30),
        log_level: std::env::var("CONNECTOR_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
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

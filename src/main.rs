//! # Replurker
//!
//! A Rust web service that searches Plurk every hour and replurks the matching
//! posts, authenticating with OAuth 1.0a signed requests.
//!
//! ## Environment Variables
//!
//! - `CONSUMER_KEY`, `CONSUMER_SECRET`, `OAUTH_TOKEN`, `OAUTH_TOKEN_SECRET`: Plurk credentials
//! - `PLURK_SEARCH_QUERY`: text to search for
//! - `PORT`: Server port (defaults to 3000)
//!
//! A `.env` file in the working directory is loaded first if present.
//!
//! ## API Endpoints
//!
//! - `GET /`: Returns a welcome message
//! - `GET /health`: Returns service health status
//! - `GET /run-cron`: Runs the search/replurk job immediately

use axum::{routing::get, Router};
use log::{error, info};
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use replurker::{
    get_server_port, handle_health, handle_root, handle_run_cron, start_replurk_cronjob,
    PlurkConfig, ReplurkContext,
};

/// Main entry point for the replurker service.
///
/// Loads configuration, starts the replurk scheduler and serves the HTTP
/// routes until the server fails or the process receives Ctrl+C.
///
/// # Errors
///
/// Returns (and exits non-zero) when the HTTP client cannot be built, the
/// cron expression is invalid, the scheduler fails to start or the port
/// cannot be bound.
///
/// # Example Usage
///
/// ```bash
/// # Run with default port 3000
/// cargo run --bin replurker
///
/// # Run with debug logging
/// RUST_LOG=debug cargo run --bin replurker
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dotenv_result = dotenvy::dotenv();

    // Initialize the logging system
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => error!("Failed to load .env file: {}", e),
    }

    let config = PlurkConfig::from_env();
    let ctx = ReplurkContext::from_config(config).map_err(|e| {
        error!("Failed to build Plurk HTTP client: {}", e);
        e
    })?;

    // An invalid REPLURK_CRON stops startup before the server binds
    let mut scheduler = start_replurk_cronjob(ctx.clone()).await.map_err(|e| {
        error!(
            "Failed to create cronjob scheduler for schedule '{}': {}",
            ctx.config.cron_schedule, e
        );
        e
    })?;
    scheduler.start().await.map_err(|e| {
        error!("Failed to start cronjob scheduler: {}", e);
        e
    })?;
    info!("Started Plurk auto-replurk cronjob");

    // Build the HTTP application with all routes and middleware
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/run-cron", get(handle_run_cron))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(ctx);

    let port = get_server_port();
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting replurker server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        e
    })?;

    // Serve until the server fails or Ctrl+C arrives
    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
            }
        }
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Received shutdown signal");
        }
    }

    info!("Stopping cronjob scheduler");
    scheduler.shutdown().await?;
    Ok(())
}

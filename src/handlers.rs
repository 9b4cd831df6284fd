//! HTTP route handlers for the replurker service.
//!
//! This module contains all the HTTP route handler functions that process
//! incoming requests and return appropriate responses.

use axum::{extract::State, response::Json};
use log::info;
use serde_json::{json, Value};

use crate::cronjob::run_replurk_cycle;
use crate::plurk::ReplurkContext;

/// Handles GET requests to the root `/` endpoint.
pub async fn handle_root() -> &'static str {
    "Replurker is running!"
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "replurker"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "replurker"}))
}

/// Handles GET requests to the `/run-cron` endpoint.
///
/// Runs the same search/replurk cycle as the scheduled job and waits for it
/// to finish. Failures inside the cycle are only logged; the response is
/// always `200 OK` with a fixed confirmation.
pub async fn handle_run_cron(State(ctx): State<ReplurkContext>) -> &'static str {
    info!("Manually triggering Plurk auto-replurk job");
    let report = run_replurk_cycle(&ctx).await;
    info!(
        "Manual run finished: {} plurks found, replurked: {}",
        report.found,
        report.outcome.is_completed()
    );
    "Manually triggered replurk completed!"
}

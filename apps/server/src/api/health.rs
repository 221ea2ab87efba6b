use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::api::shared::{iso_timestamp, PrettyJson};
use crate::main_lib::AppState;

/// Health payload reported to the dashboard and uptime checks.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
    environment: String,
    runtime_version: &'static str,
    /// Seconds since process start.
    uptime: f64,
}

/// Static health payload. Never fails.
async fn health_check(State(state): State<Arc<AppState>>) -> PrettyJson<HealthResponse> {
    tracing::info!("Health check endpoint called");
    PrettyJson(HealthResponse {
        status: "healthy",
        timestamp: iso_timestamp(),
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.clone(),
        runtime_version: concat!("rust ", env!("CARGO_PKG_RUST_VERSION")),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

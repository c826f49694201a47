//! Observability HTTP Routes
//!
//! Root banner and health check.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::state::AppState;

pub const BANNER: &str = "IT Portal API is running";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether a `SELECT 1` round-trip succeeded
    pub database: bool,
}

/// Health check and banner routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
}

async fn banner_handler() -> &'static str {
    BANNER
}

/// Health check handler; reports degraded but still answers 200
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = state.gateway.ping().await;
    let response = HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    };

    (StatusCode::OK, Json(response))
}

//! Health check HTTP handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::web::AppState;

/// Basic process health with version and uptime
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let uptime = (now - state.start_time).num_seconds().max(0);

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": now,
        "uptime_seconds": uptime,
    }))
}

/// Liveness probe; answering at all is the signal
pub async fn liveness_check() -> &'static str {
    "OK"
}

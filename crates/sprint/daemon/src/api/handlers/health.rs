//! Health handler

use crate::api::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_secs: i64,
}

/// Liveness probe
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = chrono::Utc::now().signed_duration_since(state.started_at);
    Json(HealthResponse {
        status: "ok",
        version: state.version.clone(),
        uptime_secs: uptime.num_seconds(),
    })
}

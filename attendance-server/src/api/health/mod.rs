//! Health check endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub environment: String,
}

/// Health router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

async fn health(
    axum::extract::State(state): axum::extract::State<ServerState>,
) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        environment: state.config.environment.clone(),
    })
}

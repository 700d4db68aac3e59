//! Attendance Records API Module

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

/// Records router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/records", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/preview-total", post(handler::preview_total))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/days", put(handler::update_days))
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
}

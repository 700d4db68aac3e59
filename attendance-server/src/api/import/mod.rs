//! Bulk Import API Module

mod handler;

use axum::{middleware, routing::post, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Import router (admin only)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/import", post(handler::import))
        .layer(middleware::from_fn(require_admin))
}

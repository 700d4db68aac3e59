//! Audit Log API Module

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

/// Audit log router (role-gated in the handlers)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/audit-log", get(handler::list))
        .route("/api/audit-log/verify", get(handler::verify))
}

//! Area API Module

mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Area router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/areas", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}

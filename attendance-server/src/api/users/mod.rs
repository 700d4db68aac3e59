//! User API Module

mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

/// User router: the whole directory is admin-managed
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_admin))
}

//! Worker API Module

mod handler;

use axum::{middleware, routing::get, Router};

use crate::auth::require_admin;
use crate::core::ServerState;

/// Worker router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/workers", routes())
}

fn routes() -> Router<ServerState> {
    // 读取路由：登录即可查看
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/all", get(handler::list_with_inactive))
        .route("/{badge}", get(handler::get_by_badge));

    // 管理路由：仅管理员可用
    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{badge}",
            axum::routing::put(handler::update).delete(handler::disable),
        )
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}

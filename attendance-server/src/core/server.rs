//! Server Implementation
//!
//! HTTP 服务器启动和管理。TLS 与会话认证由前置基础设施负责，
//! 这里只起纯 HTTP 服务。

use std::time::Duration;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_actor;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests / embedding)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Assemble the full router over the given state
    pub fn build_router(state: ServerState) -> Router {
        // Actor resolution gates everything except the health probe
        let protected = Router::new()
            .merge(api::records::router())
            .merge(api::import::router())
            .merge(api::workers::router())
            .merge(api::areas::router())
            .merge(api::users::router())
            .merge(api::audit_log::router())
            .layer(middleware::from_fn_with_state(
                state.clone(),
                require_actor,
            ));

        let timeout = Duration::from_millis(state.config.request_timeout_ms);

        Router::new()
            .merge(api::health::router())
            .merge(protected)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(TimeoutLayer::new(timeout))
            .with_state(state)
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await,
        };

        // Start background tasks (audit worker)
        state.start_background_tasks().await;

        let router = Self::build_router(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Attendance server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}

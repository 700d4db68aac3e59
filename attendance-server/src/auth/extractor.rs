//! Actor Extractor
//!
//! Custom extractor resolving the `X-Actor-Id` header (set by the external
//! identity provider after authentication) against the user directory.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::utils::{AppError, ErrorCode};

/// Header carrying the authenticated actor's user id
pub const ACTOR_HEADER: &str = "x-actor-id";

impl FromRequestParts<ServerState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(actor) = parts.extensions.get::<CurrentActor>() {
            return Ok(actor.clone());
        }

        let actor_id = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(AppError::unauthenticated)?;

        let repo = UserRepository::new(state.db.clone());
        let user = repo
            .find_by_id(actor_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(actor_id, "request with unknown actor id");
                AppError::with_message(
                    ErrorCode::UnknownActor,
                    format!("Unknown actor: {actor_id}"),
                )
            })?;

        if !user.is_active {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }

        let actor = CurrentActor::from(user);

        // Store in extensions for potential reuse
        parts.extensions.insert(actor.clone());

        Ok(actor)
    }
}

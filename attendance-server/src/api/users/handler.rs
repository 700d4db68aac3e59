//! User API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::{AppUser, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::AuditAction;

const RESOURCE: &str = "app_user";

/// List all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AppUser>>> {
    let users = UserRepository::new(state.db.clone())
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(Json(users))
}

/// Get user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppUser>> {
    let user = UserRepository::new(state.db.clone())
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
        })?;
    Ok(Json(user))
}

/// Create a new user
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<AppUser>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let user = UserRepository::new(state.db.clone())
        .create(payload)
        .await
        .map_err(AppError::from)?;

    let id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state.audit.log(
        RESOURCE,
        &id,
        AuditAction::Insert,
        None,
        serde_json::to_value(&user).ok(),
        Some(actor.id.clone()),
    );

    Ok(Json(user))
}

/// Update a user
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<AppUser>> {
    let repo = UserRepository::new(state.db.clone());
    let old = repo.find_by_id(&id).await.map_err(AppError::from)?;
    let user = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.audit.log(
        RESOURCE,
        &id,
        AuditAction::Update,
        old.as_ref().and_then(|u| serde_json::to_value(u).ok()),
        serde_json::to_value(&user).ok(),
        Some(actor.id.clone()),
    );

    Ok(Json(user))
}

/// Deactivate a user
pub async fn delete(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    let old = repo.find_by_id(&id).await.map_err(AppError::from)?;
    let result = repo.delete(&id).await.map_err(AppError::from)?;

    if result {
        let new = repo.find_by_id(&id).await.map_err(AppError::from)?;
        state.audit.log(
            RESOURCE,
            &id,
            AuditAction::Update,
            old.as_ref().and_then(|u| serde_json::to_value(u).ok()),
            new.as_ref().and_then(|u| serde_json::to_value(u).ok()),
            Some(actor.id.clone()),
        );
    }

    Ok(Json(result))
}

//! Area API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::models::{Area, AreaCreate, AreaUpdate};
use crate::db::repository::AreaRepository;
use crate::utils::validation::{validate_optional_text, validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};
use shared::models::AuditAction;

const RESOURCE: &str = "area";

/// List all active areas
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Area>>> {
    let areas = AreaRepository::new(state.db.clone())
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(Json(areas))
}

/// Create a new area
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<AreaCreate>,
) -> AppResult<Json<Area>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let area = AreaRepository::new(state.db.clone())
        .create(payload)
        .await
        .map_err(AppError::from)?;

    let id = area.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    state.audit.log(
        RESOURCE,
        &id,
        AuditAction::Insert,
        None,
        serde_json::to_value(&area).ok(),
        Some(actor.id.clone()),
    );

    Ok(Json(area))
}

/// Update an area
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<AreaUpdate>,
) -> AppResult<Json<Area>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = AreaRepository::new(state.db.clone());
    let old = repo.find_by_id(&id).await.map_err(AppError::from)?;
    let area = repo.update(&id, payload).await.map_err(AppError::from)?;

    state.audit.log(
        RESOURCE,
        &id,
        AuditAction::Update,
        old.as_ref().and_then(|a| serde_json::to_value(a).ok()),
        serde_json::to_value(&area).ok(),
        Some(actor.id.clone()),
    );

    Ok(Json(area))
}

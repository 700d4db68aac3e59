//! Worker API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::convert::WorkerResponse;
use crate::auth::{CurrentActor, ScopeResolver};
use crate::core::ServerState;
use crate::db::models::{Worker, WorkerCreate, WorkerUpdate};
use crate::db::repository::{AreaRepository, WorkerRepository};
use crate::utils::validation::{
    validate_daily_rate, validate_optional_text, validate_required_text, MAX_NAME_LEN,
    MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::AuditAction;

const RESOURCE: &str = "worker";

async fn resolver(state: &ServerState) -> AppResult<ScopeResolver> {
    let areas = AreaRepository::new(state.db.clone())
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(ScopeResolver::new(&areas))
}

fn visible<'a>(actor: &CurrentActor, workers: &'a [Worker]) -> Vec<&'a Worker> {
    workers
        .iter()
        .filter(|w| {
            actor.scope.allows(&w.area.to_string()) && actor.covers_nationality(&w.nationality)
        })
        .collect()
}

/// List active workers within the actor's scope
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<Vec<WorkerResponse>>> {
    let workers = WorkerRepository::new(state.db.clone())
        .find_all()
        .await
        .map_err(AppError::from)?;
    let resolver = resolver(&state).await?;
    Ok(Json(
        visible(&actor, &workers)
            .into_iter()
            .map(|w| WorkerResponse::from_worker(w, &resolver))
            .collect(),
    ))
}

/// List workers including disabled, within the actor's scope
pub async fn list_with_inactive(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<Vec<WorkerResponse>>> {
    let workers = WorkerRepository::new(state.db.clone())
        .find_all_with_inactive()
        .await
        .map_err(AppError::from)?;
    let resolver = resolver(&state).await?;
    Ok(Json(
        visible(&actor, &workers)
            .into_iter()
            .map(|w| WorkerResponse::from_worker(w, &resolver))
            .collect(),
    ))
}

/// Get worker by badge id
pub async fn get_by_badge(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(badge): Path<String>,
) -> AppResult<Json<WorkerResponse>> {
    let worker = WorkerRepository::new(state.db.clone())
        .find_by_badge(&badge)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::WorkerNotFound, format!("Worker {badge} not found"))
        })?;

    if !actor.scope.allows(&worker.area.to_string())
        || !actor.covers_nationality(&worker.nationality)
    {
        return Err(AppError::new(ErrorCode::ScopeDenied));
    }

    let resolver = resolver(&state).await?;
    Ok(Json(WorkerResponse::from_worker(&worker, &resolver)))
}

/// Create a new worker
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<WorkerCreate>,
) -> AppResult<Json<WorkerResponse>> {
    validate_required_text(&payload.badge, "badge", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_daily_rate(payload.daily_rate)?;

    let repo = WorkerRepository::new(state.db.clone());
    let worker = repo.create(payload).await.map_err(AppError::from)?;

    state.audit.log(
        RESOURCE,
        &worker.badge,
        AuditAction::Insert,
        None,
        serde_json::to_value(&worker).ok(),
        Some(actor.id.clone()),
    );

    let resolver = resolver(&state).await?;
    Ok(Json(WorkerResponse::from_worker(&worker, &resolver)))
}

/// Update a worker (area reassignment, pay-rate change)
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(badge): Path<String>,
    Json(payload): Json<WorkerUpdate>,
) -> AppResult<Json<WorkerResponse>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(rate) = payload.daily_rate {
        validate_daily_rate(rate)?;
    }

    let repo = WorkerRepository::new(state.db.clone());
    let old = repo.find_by_badge(&badge).await.map_err(AppError::from)?;
    let worker = repo.update(&badge, payload).await.map_err(AppError::from)?;

    state.audit.log(
        RESOURCE,
        &badge,
        AuditAction::Update,
        old.as_ref().and_then(|w| serde_json::to_value(w).ok()),
        serde_json::to_value(&worker).ok(),
        Some(actor.id.clone()),
    );

    let resolver = resolver(&state).await?;
    Ok(Json(WorkerResponse::from_worker(&worker, &resolver)))
}

/// Soft-disable a worker (attendance history keeps referencing it)
pub async fn disable(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(badge): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = WorkerRepository::new(state.db.clone());
    let old = repo.find_by_badge(&badge).await.map_err(AppError::from)?;
    let result = repo.disable(&badge).await.map_err(AppError::from)?;

    if result {
        let new = repo.find_by_badge(&badge).await.map_err(AppError::from)?;
        state.audit.log(
            RESOURCE,
            &badge,
            AuditAction::Update,
            old.as_ref().and_then(|w| serde_json::to_value(w).ok()),
            new.as_ref().and_then(|w| serde_json::to_value(w).ok()),
            Some(actor.id.clone()),
        );
    }

    Ok(Json(result))
}

//! Attendance Records API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::repository::{AttendanceRecordRepository, WorkerRepository};
use crate::payroll;
use crate::utils::validation::{validate_day_counts, validate_period, validate_required_text,
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::{AppError, AppResult};
use crate::workflow::actions::SeedRecordAction;
use crate::workflow::{WorkflowCommand, WorkflowManager};
use shared::models::{
    AttendanceRecordDto, DayCounts, RecordCreate, RecordCreateResponse, RecordQuery,
    RejectRequest, Stage, TotalPreview, TransitionResponse,
};

fn manager(state: &ServerState) -> WorkflowManager {
    WorkflowManager::new(state.db.clone(), state.audit.clone())
}

/// List records visible to the actor, optionally filtered by period,
/// status and area
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<RecordQuery>,
) -> AppResult<Json<Vec<AttendanceRecordDto>>> {
    let workers = WorkerRepository::new(state.db.clone())
        .find_all_with_inactive()
        .await
        .map_err(AppError::from)?;

    // Scope, nationality restriction and the area filter all narrow by
    // worker badge
    let visible_badges: Vec<String> = workers
        .iter()
        .filter(|w| {
            let area_id = w.area.to_string();
            actor.scope.allows(&area_id)
                && actor.covers_nationality(&w.nationality)
                && query.area.as_ref().is_none_or(|a| &area_id == a)
        })
        .map(|w| w.badge.clone())
        .collect();

    let unrestricted =
        actor.scope.is_all() && actor.nationality_restriction.is_none() && query.area.is_none();
    let badge_filter = if unrestricted {
        None
    } else {
        Some(visible_badges)
    };

    let records = AttendanceRecordRepository::new(state.db.clone())
        .list(&query, badge_filter)
        .await
        .map_err(AppError::from)?;

    Ok(Json(records.iter().map(|r| r.to_dto()).collect()))
}

/// Get one record (strict read model: out-of-scope records are invisible)
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<AttendanceRecordDto>> {
    let record = manager(&state)
        .load_visible(&id, &actor)
        .await
        .map_err(AppError::from)?;
    Ok(Json(record.to_dto()))
}

/// Manual period entry: seeds a record at the initial stage
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<RecordCreate>,
) -> AppResult<Json<RecordCreateResponse>> {
    validate_required_text(&payload.worker_id, "worker_id", MAX_SHORT_TEXT_LEN)?;
    validate_period(payload.month, payload.year)?;
    validate_day_counts(&payload.days)?;

    let outcome = manager(&state)
        .seed(
            SeedRecordAction {
                worker_id: payload.worker_id,
                month: payload.month,
                year: payload.year,
                days: payload.days,
                initial_stage: Stage::initial(),
            },
            &actor,
        )
        .await
        .map_err(AppError::from)?;

    Ok(Json(RecordCreateResponse {
        record: outcome.record.to_dto(),
        created: outcome.created,
        audit_degraded: outcome.audit_degraded,
    }))
}

/// Edit day counts while pending; always recomputes the derived total
pub async fn update_days(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    Json(days): Json<DayCounts>,
) -> AppResult<Json<TransitionResponse>> {
    validate_day_counts(&days)?;

    let outcome = manager(&state)
        .execute(&WorkflowCommand::UpdateDays { record_id: id, days }, &actor)
        .await
        .map_err(AppError::from)?;

    Ok(Json(TransitionResponse {
        record: outcome.record.to_dto(),
        audit_degraded: outcome.audit_degraded,
    }))
}

/// Approve: advance one stage
pub async fn approve(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
) -> AppResult<Json<TransitionResponse>> {
    let outcome = manager(&state)
        .execute(&WorkflowCommand::Approve { record_id: id }, &actor)
        .await
        .map_err(AppError::from)?;

    Ok(Json(TransitionResponse {
        record: outcome.record.to_dto(),
        audit_degraded: outcome.audit_degraded,
    }))
}

/// Reject: send back one stage for rework, with a mandatory note
pub async fn reject(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<String>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<TransitionResponse>> {
    validate_required_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let outcome = manager(&state)
        .execute(
            &WorkflowCommand::Reject {
                record_id: id,
                notes: payload.notes,
            },
            &actor,
        )
        .await
        .map_err(AppError::from)?;

    Ok(Json(TransitionResponse {
        record: outcome.record.to_dto(),
        audit_degraded: outcome.audit_degraded,
    }))
}

/// Standalone calculation preview; no record is touched
pub async fn preview_total(Json(days): Json<DayCounts>) -> AppResult<Json<TotalPreview>> {
    Ok(Json(TotalPreview {
        total_calculated_days: payroll::calculate_total(&days),
    }))
}

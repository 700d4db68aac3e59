//! Bulk Import Handler
//!
//! Consumes already-parsed spreadsheet rows (the spreadsheet collaborator
//! owns cell parsing). Per-row failures are collected and reported; they
//! never abort the batch.

use axum::{extract::State, Json};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::db::repository::{AreaRepository, WorkerRepository};
use crate::utils::validation::{
    validate_daily_rate, validate_day_counts, validate_period, validate_required_text,
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::{AppError, AppResult};
use crate::workflow::actions::SeedRecordAction;
use crate::workflow::WorkflowManager;
use shared::models::{
    AuditAction, ImportReport, ImportRequest, ImportRow, ImportRowOutcome, ImportRowStatus,
};

/// Import a batch of attendance rows for one period
pub async fn import(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(request): Json<ImportRequest>,
) -> AppResult<Json<ImportReport>> {
    validate_period(request.month, request.year)?;

    let manager = WorkflowManager::new(state.db.clone(), state.audit.clone());
    let initial_stage = state.config.import_policy.initial_stage();

    let mut outcomes = Vec::with_capacity(request.rows.len());
    let mut audit_degraded = false;

    for row in &request.rows {
        match import_row(&state, &manager, &actor, row, request.month, request.year, initial_stage)
            .await
        {
            Ok((status, degraded)) => {
                audit_degraded |= degraded;
                outcomes.push(ImportRowOutcome {
                    worker_id: row.worker_id.clone(),
                    status,
                    message: None,
                });
            }
            Err(e) => {
                outcomes.push(ImportRowOutcome {
                    worker_id: row.worker_id.clone(),
                    status: ImportRowStatus::Failed,
                    message: Some(e.message.clone()),
                });
            }
        }
    }

    let report = ImportReport::from_outcomes(outcomes, audit_degraded);
    tracing::info!(
        month = request.month,
        year = request.year,
        created = report.created,
        skipped = report.skipped,
        failed = report.failed,
        "bulk import finished"
    );
    Ok(Json(report))
}

async fn import_row(
    state: &ServerState,
    manager: &WorkflowManager,
    actor: &CurrentActor,
    row: &ImportRow,
    month: u32,
    year: i32,
    initial_stage: shared::models::Stage,
) -> Result<(ImportRowStatus, bool), AppError> {
    validate_required_text(&row.worker_id, "worker_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&row.worker_name, "worker_name", MAX_NAME_LEN)?;
    validate_required_text(&row.area, "area", MAX_NAME_LEN)?;
    validate_day_counts(&row.day_counts())?;
    validate_daily_rate(row.daily_rate)?;

    let mut degraded = false;

    // Unseen area names create the area on demand
    let areas = AreaRepository::new(state.db.clone());
    let known_before = areas.find_by_name(&row.area).await.map_err(AppError::from)?;
    let area = areas.find_or_create(&row.area).await.map_err(AppError::from)?;
    let area_id = area
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    if known_before.is_none() && !row.area.starts_with("area:") {
        degraded |= !state.audit.log(
            "area",
            &area_id,
            AuditAction::Insert,
            None,
            serde_json::to_value(&area).ok(),
            Some(actor.id.clone()),
        );
    }

    // Worker upsert keyed on badge
    let workers = WorkerRepository::new(state.db.clone());
    let old_worker = workers
        .find_by_badge(&row.worker_id)
        .await
        .map_err(AppError::from)?;
    let worker = workers
        .upsert_from_import(&row.worker_id, &row.worker_name, &area_id, "", row.daily_rate)
        .await
        .map_err(AppError::from)?;
    let worker_action = if old_worker.is_some() {
        AuditAction::Update
    } else {
        AuditAction::Insert
    };
    degraded |= !state.audit.log(
        "worker",
        &row.worker_id,
        worker_action,
        old_worker.as_ref().and_then(|w| serde_json::to_value(w).ok()),
        serde_json::to_value(&worker).ok(),
        Some(actor.id.clone()),
    );

    // Seed the attendance record; existing keys are left untouched
    let outcome = manager
        .seed(
            SeedRecordAction {
                worker_id: row.worker_id.clone(),
                month,
                year,
                days: row.day_counts(),
                initial_stage,
            },
            actor,
        )
        .await
        .map_err(AppError::from)?;
    degraded |= outcome.audit_degraded;

    let status = if outcome.created {
        ImportRowStatus::Created
    } else {
        ImportRowStatus::Skipped
    };
    Ok((status, degraded))
}

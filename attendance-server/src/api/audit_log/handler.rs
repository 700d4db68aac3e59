//! Audit Log API Handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{AuditChainVerification, AuditListResponse, AuditQuery, Role};

/// Oversight roles allowed to read the audit trail
fn check_oversight(actor: &CurrentActor) -> Result<(), AppError> {
    match actor.role {
        Role::Admin | Role::InternalAudit | Role::Mayor => Ok(()),
        _ => Err(AppError::new(ErrorCode::PermissionDenied)),
    }
}

/// Query audit entries
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditListResponse>> {
    check_oversight(&actor)?;

    let (items, total) = state
        .audit
        .query(&query)
        .await
        .map_err(AppError::from)?;

    Ok(Json(AuditListResponse { items, total }))
}

/// Verify the hash chain end to end
pub async fn verify(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<AuditChainVerification>> {
    check_oversight(&actor)?;

    let verification = state.audit.verify_chain().await.map_err(AppError::from)?;
    if !verification.chain_intact {
        tracing::error!(
            breaks = verification.breaks.len(),
            "audit chain verification failed"
        );
    }
    Ok(Json(verification))
}

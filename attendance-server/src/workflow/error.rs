//! Workflow error types

use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use shared::models::{Role, Stage};
use thiserror::Error;

/// Errors from approval state machine operations
///
/// Authorization failures and stale-stage conflicts are distinct kinds and
/// never partially apply; every precondition runs before any write.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Attendance record {0} not found")]
    RecordNotFound(String),

    #[error("Worker {0} not found")]
    WorkerNotFound(String),

    #[error("Worker {0} is disabled")]
    WorkerDisabled(String),

    #[error("Role {role} is not authorized for stage {stage}")]
    RoleStageMismatch { role: Role, stage: Stage },

    #[error("Record already at {stage}, past the {authorized} stage of role {role}")]
    StaleStage {
        role: Role,
        stage: Stage,
        authorized: Stage,
    },

    #[error("Role {0} has read-only oversight, no transition rights")]
    ReadOnlyRole(Role),

    #[error("Area {0} is outside the actor's scope")]
    ScopeDenied(String),

    #[error("Worker nationality is outside the actor's restriction")]
    NationalityRestricted,

    #[error("Record {0} is approved and immutable")]
    RecordTerminal(String),

    #[error("Record {0} is at the initial stage, cannot reject further back")]
    AlreadyAtInitialStage(String),

    #[error("Rejection requires a non-empty note")]
    NoteRequired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<RepoError> for WorkflowError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => WorkflowError::RecordNotFound(msg),
            RepoError::Duplicate(msg) | RepoError::Conflict(msg) => WorkflowError::Conflict(msg),
            RepoError::Validation(msg) => WorkflowError::Validation(msg),
            RepoError::Database(msg) => WorkflowError::Database(msg),
        }
    }
}

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        let code = match &err {
            WorkflowError::RecordNotFound(_) => ErrorCode::RecordNotFound,
            WorkflowError::WorkerNotFound(_) => ErrorCode::WorkerNotFound,
            WorkflowError::WorkerDisabled(_) => ErrorCode::WorkerDisabled,
            WorkflowError::RoleStageMismatch { .. } => ErrorCode::RoleStageMismatch,
            WorkflowError::StaleStage { .. } => ErrorCode::StaleStage,
            WorkflowError::ReadOnlyRole(_) => ErrorCode::ReadOnlyRole,
            WorkflowError::ScopeDenied(_) => ErrorCode::ScopeDenied,
            WorkflowError::NationalityRestricted => ErrorCode::NationalityRestricted,
            WorkflowError::RecordTerminal(_) => ErrorCode::RecordTerminal,
            WorkflowError::AlreadyAtInitialStage(_) => ErrorCode::AlreadyAtInitialStage,
            WorkflowError::NoteRequired => ErrorCode::RejectionNoteRequired,
            WorkflowError::Validation(_) => ErrorCode::ValidationFailed,
            WorkflowError::Conflict(_) => ErrorCode::VersionConflict,
            WorkflowError::Database(_) => ErrorCode::DatabaseError,
        };
        AppError::with_message(code, err.to_string())
    }
}

//! Transition action implementations
//!
//! Each action validates its preconditions against a record copy and
//! returns the new record version; persistence and audit stay in the
//! manager so that no action ever partially applies.

mod approve;
mod reject;
mod seed_record;
mod update_days;

pub use approve::ApproveAction;
pub use reject::RejectAction;
pub use seed_record::SeedRecordAction;
pub use update_days::UpdateDaysAction;

use crate::auth::{permissions, CurrentActor};
use crate::workflow::error::WorkflowError;
use shared::models::Stage;

/// Gate an actor against a record's current stage.
///
/// Terminal records are immutable (conflict). Each transition role is
/// authorized for exactly one stage: a record already past that stage is a
/// stale-state conflict, a record before it is an authorization failure.
/// Admin overrides every pending stage; Mayor never transitions.
pub fn authorize(actor: &CurrentActor, stage: Stage, record_key: &str) -> Result<(), WorkflowError> {
    if stage.is_terminal() {
        return Err(WorkflowError::RecordTerminal(record_key.to_string()));
    }
    if actor.is_admin() {
        return Ok(());
    }
    match permissions::authorized_stage(actor.role) {
        None => Err(WorkflowError::ReadOnlyRole(actor.role)),
        Some(authorized) if authorized == stage => Ok(()),
        Some(authorized) if stage > authorized => Err(WorkflowError::StaleStage {
            role: actor.role,
            stage,
            authorized,
        }),
        Some(_) => Err(WorkflowError::RoleStageMismatch {
            role: actor.role,
            stage,
        }),
    }
}

//! Approve action
//!
//! Advances a record exactly one stage forward in the fixed order.

use super::authorize;
use crate::auth::CurrentActor;
use crate::db::models::AttendanceRecord;
use crate::workflow::error::WorkflowError;

/// Approve action
#[derive(Debug, Clone)]
pub struct ApproveAction;

impl ApproveAction {
    /// Compute the approved record version.
    ///
    /// Preconditions: actor authorized for the current stage, record not
    /// terminal. Effect: status advances one step, rejection notes are
    /// cleared, `updated_at` refreshed.
    pub fn apply(
        &self,
        record: &AttendanceRecord,
        actor: &CurrentActor,
        now: i64,
    ) -> Result<AttendanceRecord, WorkflowError> {
        authorize(actor, record.status, &record.key())?;

        let next = record
            .status
            .next()
            .ok_or_else(|| WorkflowError::RecordTerminal(record.key()))?;

        let mut approved = record.clone();
        approved.status = next;
        approved.rejection_notes = None;
        approved.updated_at = now;
        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::actions::test_support::*;
    use shared::models::{Role, Stage, STAGE_ORDER};

    #[test]
    fn advances_exactly_one_step() {
        let record = record_at(Stage::PendingSupervisor);
        let actor = actor_with_role(Role::Supervisor);
        let approved = ApproveAction.apply(&record, &actor, 1).unwrap();
        assert_eq!(approved.status, Stage::PendingGs);
        assert_eq!(approved.total_calculated_days, record.total_calculated_days);
    }

    #[test]
    fn clears_rejection_notes() {
        let mut record = record_at(Stage::PendingSupervisor);
        record.rejection_notes = Some("missing signature".into());
        let actor = actor_with_role(Role::Supervisor);
        let approved = ApproveAction.apply(&record, &actor, 1).unwrap();
        assert_eq!(approved.rejection_notes, None);
    }

    #[test]
    fn never_skips_a_stage() {
        let actor = actor_with_role(Role::Admin);
        for stage in STAGE_ORDER.iter().take(STAGE_ORDER.len() - 1) {
            let record = record_at(*stage);
            let approved = ApproveAction.apply(&record, &actor, 1).unwrap();
            assert_eq!(approved.status.position(), stage.position() + 1);
        }
    }

    #[test]
    fn terminal_record_fails_with_conflict() {
        let record = record_at(Stage::Approved);
        let actor = actor_with_role(Role::Admin);
        let err = ApproveAction.apply(&record, &actor, 1).unwrap_err();
        assert!(matches!(err, WorkflowError::RecordTerminal(_)));
    }

    #[test]
    fn wrong_role_leaves_record_untouched() {
        let record = record_at(Stage::PendingGs);
        let actor = actor_with_role(Role::Hr);
        assert!(ApproveAction.apply(&record, &actor, 1).is_err());
        // apply works on a copy; the input record is unchanged
        assert_eq!(record.status, Stage::PendingGs);
    }
}

//! Seed action
//!
//! Builds a brand-new record for a worker/period that has none (manual
//! entry or bulk import). The initial stage comes from the import policy.

use crate::auth::{permissions, CurrentActor};
use crate::db::models::AttendanceRecord;
use crate::payroll;
use crate::workflow::error::WorkflowError;
use shared::models::{DayCounts, Stage};

/// Seed action
#[derive(Debug, Clone)]
pub struct SeedRecordAction {
    pub worker_id: String,
    pub month: u32,
    pub year: i32,
    pub days: DayCounts,
    /// `PENDING_SUPERVISOR` or `PENDING_GS` per import policy
    pub initial_stage: Stage,
}

impl SeedRecordAction {
    /// Build the new record version.
    ///
    /// Seeding is an initial-stage operation: only the initial-stage role
    /// and admins create records. The derived total is computed
    /// immediately.
    pub fn apply(
        &self,
        actor: &CurrentActor,
        now: i64,
    ) -> Result<AttendanceRecord, WorkflowError> {
        if !actor.is_admin()
            && permissions::authorized_stage(actor.role) != Some(Stage::initial())
        {
            return Err(WorkflowError::RoleStageMismatch {
                role: actor.role,
                stage: Stage::initial(),
            });
        }

        if self.initial_stage.is_terminal() {
            return Err(WorkflowError::Validation(format!(
                "cannot seed a record at {}",
                self.initial_stage
            )));
        }

        Ok(AttendanceRecord {
            id: None,
            worker_id: self.worker_id.clone(),
            month: self.month,
            year: self.year,
            normal_days: self.days.normal_days,
            overtime_normal_days: self.days.overtime_normal_days,
            overtime_holiday_days: self.days.overtime_holiday_days,
            overtime_eid_days: self.days.overtime_eid_days,
            total_calculated_days: payroll::calculate_total(&self.days),
            status: self.initial_stage,
            rejection_notes: None,
            updated_at: now,
            version: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::actions::test_support::*;
    use shared::models::Role;

    fn seed(initial_stage: Stage) -> SeedRecordAction {
        SeedRecordAction {
            worker_id: "W1".into(),
            month: 11,
            year: 2025,
            days: DayCounts {
                normal_days: 22.0,
                overtime_normal_days: 4.0,
                overtime_holiday_days: 1.0,
                overtime_eid_days: 0.0,
            },
            initial_stage,
        }
    }

    #[test]
    fn computes_total_immediately() {
        let actor = actor_with_role(Role::Supervisor);
        let record = seed(Stage::PendingSupervisor).apply(&actor, 1).unwrap();
        assert_eq!(record.total_calculated_days, 25.0);
        assert_eq!(record.status, Stage::PendingSupervisor);
        assert_eq!(record.key(), "W1-11-2025");
    }

    #[test]
    fn import_policy_may_skip_to_gs() {
        let actor = actor_with_role(Role::Admin);
        let record = seed(Stage::PendingGs).apply(&actor, 1).unwrap();
        assert_eq!(record.status, Stage::PendingGs);
    }

    #[test]
    fn non_initial_roles_cannot_seed() {
        let actor = actor_with_role(Role::Finance);
        let err = seed(Stage::PendingSupervisor).apply(&actor, 1).unwrap_err();
        assert!(matches!(err, WorkflowError::RoleStageMismatch { .. }));
    }
}

//! Day-count edit action
//!
//! Replaces the four day-count fields while the record is pending, without
//! changing status. Always recomputes the derived total.

use super::authorize;
use crate::auth::CurrentActor;
use crate::db::models::AttendanceRecord;
use crate::payroll;
use crate::workflow::error::WorkflowError;
use shared::models::DayCounts;

/// Edit-while-pending action
#[derive(Debug, Clone)]
pub struct UpdateDaysAction {
    pub days: DayCounts,
}

impl UpdateDaysAction {
    /// Compute the edited record version.
    ///
    /// Only an actor authorized for the *current* stage may edit; the
    /// status does not change and `total_calculated_days` is recomputed
    /// from the new counts.
    pub fn apply(
        &self,
        record: &AttendanceRecord,
        actor: &CurrentActor,
        now: i64,
    ) -> Result<AttendanceRecord, WorkflowError> {
        authorize(actor, record.status, &record.key())?;

        let mut edited = record.clone();
        edited.set_day_counts(self.days);
        edited.total_calculated_days = payroll::calculate_total(&self.days);
        edited.updated_at = now;
        Ok(edited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::actions::test_support::*;
    use shared::models::{Role, Stage};

    fn days(n: f64, on: f64, oh: f64, oe: f64) -> DayCounts {
        DayCounts {
            normal_days: n,
            overtime_normal_days: on,
            overtime_holiday_days: oh,
            overtime_eid_days: oe,
        }
    }

    #[test]
    fn recomputes_total_without_touching_status() {
        let record = record_at(Stage::PendingGs);
        let actor = actor_with_role(Role::GeneralSupervisor);
        let edited = UpdateDaysAction {
            days: days(20.0, 2.0, 0.0, 1.0),
        }
        .apply(&record, &actor, 1)
        .unwrap();
        assert_eq!(edited.status, Stage::PendingGs);
        assert_eq!(edited.total_calculated_days, 22.0);
    }

    #[test]
    fn only_current_stage_role_may_edit() {
        let record = record_at(Stage::PendingGs);
        let actor = actor_with_role(Role::Supervisor);
        let err = UpdateDaysAction {
            days: days(20.0, 0.0, 0.0, 0.0),
        }
        .apply(&record, &actor, 1)
        .unwrap_err();
        assert!(matches!(err, WorkflowError::StaleStage { .. }));
    }

    #[test]
    fn approved_record_is_immutable() {
        let record = record_at(Stage::Approved);
        let actor = actor_with_role(Role::Admin);
        let err = UpdateDaysAction {
            days: days(20.0, 0.0, 0.0, 0.0),
        }
        .apply(&record, &actor, 1)
        .unwrap_err();
        assert!(matches!(err, WorkflowError::RecordTerminal(_)));
    }
}

//! Reject action
//!
//! Sends a record back exactly one stage for rework, with a mandatory note.

use super::authorize;
use crate::auth::CurrentActor;
use crate::db::models::AttendanceRecord;
use crate::utils::validation::{validate_required_text, MAX_NOTE_LEN};
use crate::workflow::error::WorkflowError;

/// Reject action
#[derive(Debug, Clone)]
pub struct RejectAction {
    /// Structured reason code or free text
    pub notes: String,
}

impl RejectAction {
    /// Compute the rejected record version.
    ///
    /// Preconditions: actor authorized for the current stage, record not
    /// terminal and not at the initial stage, non-empty note. Effect:
    /// status retreats one step, the note is stored.
    pub fn apply(
        &self,
        record: &AttendanceRecord,
        actor: &CurrentActor,
        now: i64,
    ) -> Result<AttendanceRecord, WorkflowError> {
        authorize(actor, record.status, &record.key())?;

        if validate_required_text(&self.notes, "notes", MAX_NOTE_LEN).is_err() {
            return Err(WorkflowError::NoteRequired);
        }

        let prev = record
            .status
            .prev()
            .ok_or_else(|| WorkflowError::AlreadyAtInitialStage(record.key()))?;

        let mut rejected = record.clone();
        rejected.status = prev;
        rejected.rejection_notes = Some(self.notes.trim().to_string());
        rejected.updated_at = now;
        Ok(rejected)
    }
}

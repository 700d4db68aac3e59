//! Workflow manager
//!
//! Executes transition commands: load → scope gate → action → guarded
//! persist → audit. The state machine never partially applies; every
//! precondition runs before the single guarded write.

use std::sync::Arc;

use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::audit::AuditService;
use crate::auth::CurrentActor;
use crate::db::models::attendance_record::TABLE;
use crate::db::models::{AttendanceRecord, Worker};
use crate::db::repository::{AttendanceRecordRepository, RepoError, WorkerRepository};
use crate::workflow::actions::{ApproveAction, RejectAction, SeedRecordAction, UpdateDaysAction};
use crate::workflow::error::WorkflowError;
use shared::models::{AuditAction, DayCounts};

/// A transition request against an existing record
#[derive(Debug, Clone)]
pub enum WorkflowCommand {
    Approve {
        record_id: String,
    },
    Reject {
        record_id: String,
        notes: String,
    },
    UpdateDays {
        record_id: String,
        days: DayCounts,
    },
}

impl WorkflowCommand {
    fn record_id(&self) -> &str {
        match self {
            WorkflowCommand::Approve { record_id }
            | WorkflowCommand::Reject { record_id, .. }
            | WorkflowCommand::UpdateDays { record_id, .. } => record_id,
        }
    }
}

/// Result of a transition or day-count edit
#[derive(Debug)]
pub struct TransitionOutcome {
    pub record: AttendanceRecord,
    /// Mutation succeeded but the audit entry could not be enqueued
    pub audit_degraded: bool,
}

/// Result of a seed operation
#[derive(Debug)]
pub struct SeedOutcome {
    pub record: AttendanceRecord,
    /// False when the worker/period already had a record (no-op)
    pub created: bool,
    pub audit_degraded: bool,
}

/// The approval state machine over the record store
#[derive(Clone)]
pub struct WorkflowManager {
    records: AttendanceRecordRepository,
    workers: WorkerRepository,
    audit: Arc<AuditService>,
}

impl WorkflowManager {
    pub fn new(db: Surreal<Db>, audit: Arc<AuditService>) -> Self {
        Self {
            records: AttendanceRecordRepository::new(db.clone()),
            workers: WorkerRepository::new(db),
            audit,
        }
    }

    /// Execute a transition command.
    ///
    /// A version conflict is retried once against a fresh read (all
    /// preconditions re-run on the new state), then surfaced.
    pub async fn execute(
        &self,
        cmd: &WorkflowCommand,
        actor: &CurrentActor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        match self.try_execute(cmd, actor).await {
            Err(WorkflowError::Conflict(msg)) => {
                tracing::warn!(record = cmd.record_id(), "version conflict, retrying: {msg}");
                self.try_execute(cmd, actor).await
            }
            other => other,
        }
    }

    async fn try_execute(
        &self,
        cmd: &WorkflowCommand,
        actor: &CurrentActor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let record = self
            .records
            .find_by_id(cmd.record_id())
            .await?
            .ok_or_else(|| WorkflowError::RecordNotFound(cmd.record_id().to_string()))?;

        // Scope gates every transition regardless of role match
        self.check_access(actor, &record).await?;

        let now = shared::util::now_millis();
        let new_record = match cmd {
            WorkflowCommand::Approve { .. } => ApproveAction.apply(&record, actor, now)?,
            WorkflowCommand::Reject { notes, .. } => RejectAction {
                notes: notes.clone(),
            }
            .apply(&record, actor, now)?,
            WorkflowCommand::UpdateDays { days, .. } => {
                UpdateDaysAction { days: *days }.apply(&record, actor, now)?
            }
        };

        let stored = match self.records.update_guarded(&new_record, record.version).await {
            Ok(stored) => stored,
            Err(RepoError::Conflict(msg)) => return Err(WorkflowError::Conflict(msg)),
            Err(e) => return Err(e.into()),
        };

        let audit_degraded = !self.audit.log(
            TABLE,
            &stored.key(),
            AuditAction::Update,
            serde_json::to_value(&record).ok(),
            serde_json::to_value(&stored).ok(),
            Some(actor.id.clone()),
        );

        Ok(TransitionOutcome {
            record: stored,
            audit_degraded,
        })
    }

    /// Seed a record for a worker/period that has none.
    ///
    /// Idempotent on the natural key: an existing record is returned
    /// untouched (`created = false`); imports never clobber an in-flight
    /// approval chain.
    pub async fn seed(
        &self,
        action: SeedRecordAction,
        actor: &CurrentActor,
    ) -> Result<SeedOutcome, WorkflowError> {
        let worker = self
            .workers
            .find_by_badge(&action.worker_id)
            .await?
            .ok_or_else(|| WorkflowError::WorkerNotFound(action.worker_id.clone()))?;
        if !worker.is_active {
            return Err(WorkflowError::WorkerDisabled(action.worker_id.clone()));
        }
        self.check_worker_access(actor, &worker)?;

        if let Some(existing) = self
            .records
            .find_by_key(&action.worker_id, action.month, action.year)
            .await?
        {
            return Ok(SeedOutcome {
                record: existing,
                created: false,
                audit_degraded: false,
            });
        }

        let now = shared::util::now_millis();
        let record = action.apply(actor, now)?;

        let stored = match self.records.create(&record).await {
            Ok(stored) => stored,
            // Lost a seed race; the natural key makes the retry a no-op
            Err(RepoError::Duplicate(_)) => {
                let existing = self
                    .records
                    .find_by_key(&action.worker_id, action.month, action.year)
                    .await?
                    .ok_or_else(|| WorkflowError::RecordNotFound(record.key()))?;
                return Ok(SeedOutcome {
                    record: existing,
                    created: false,
                    audit_degraded: false,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let audit_degraded = !self.audit.log(
            TABLE,
            &stored.key(),
            AuditAction::Insert,
            None,
            serde_json::to_value(&stored).ok(),
            Some(actor.id.clone()),
        );

        Ok(SeedOutcome {
            record: stored,
            created: true,
            audit_degraded,
        })
    }

    /// Load a record for the strict read model.
    ///
    /// An actor whose resolved scope (or nationality restriction) excludes
    /// the record's worker cannot observe it.
    pub async fn load_visible(
        &self,
        record_id: &str,
        actor: &CurrentActor,
    ) -> Result<AttendanceRecord, WorkflowError> {
        let record = self
            .records
            .find_by_id(record_id)
            .await?
            .ok_or_else(|| WorkflowError::RecordNotFound(record_id.to_string()))?;
        self.check_access(actor, &record).await?;
        Ok(record)
    }

    /// Scope + nationality gate for an existing record
    async fn check_access(
        &self,
        actor: &CurrentActor,
        record: &AttendanceRecord,
    ) -> Result<Worker, WorkflowError> {
        let worker = self
            .workers
            .find_by_badge(&record.worker_id)
            .await?
            .ok_or_else(|| WorkflowError::WorkerNotFound(record.worker_id.clone()))?;
        self.check_worker_access(actor, &worker)?;
        Ok(worker)
    }

    fn check_worker_access(
        &self,
        actor: &CurrentActor,
        worker: &Worker,
    ) -> Result<(), WorkflowError> {
        let area_id = worker.area.to_string();
        if !actor.scope.allows(&area_id) {
            return Err(WorkflowError::ScopeDenied(area_id));
        }
        if !actor.covers_nationality(&worker.nationality) {
            return Err(WorkflowError::NationalityRestricted);
        }
        Ok(())
    }
}

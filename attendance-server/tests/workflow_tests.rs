//! Approval workflow integration tests against an embedded database.

use std::sync::Arc;
use std::time::Duration;

use attendance_server::audit::{AuditService, AuditStorage, AuditWorker};
use attendance_server::auth::CurrentActor;
use attendance_server::db;
use attendance_server::db::models::{AreaCreate, WorkerCreate};
use attendance_server::db::repository::{
    AreaRepository, AttendanceRecordRepository, WorkerRepository,
};
use attendance_server::workflow::actions::SeedRecordAction;
use attendance_server::workflow::{WorkflowCommand, WorkflowError, WorkflowManager};
use shared::models::{
    AreaScope, AuditAction, AuditEntry, AuditQuery, DayCounts, RecordQuery, Role, Stage,
};
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

struct TestEnv {
    _tmp: tempfile::TempDir,
    db: Surreal<Db>,
    manager: WorkflowManager,
    audit: Arc<AuditService>,
    area_id: String,
}

async fn setup() -> TestEnv {
    let tmp = tempfile::tempdir().unwrap();
    let db = db::init_test_db(tmp.path()).await.unwrap();

    let (audit, rx) = AuditService::new(db.clone(), 64);
    tokio::spawn(AuditWorker::new(AuditStorage::new(db.clone())).run(rx));

    let area = AreaRepository::new(db.clone())
        .create(AreaCreate {
            name: "North District".into(),
        })
        .await
        .unwrap();
    let area_id = area.id.unwrap().to_string();

    WorkerRepository::new(db.clone())
        .create(WorkerCreate {
            badge: "W1".into(),
            name: "A. Hassan".into(),
            area: area_id.clone(),
            nationality: "EG".into(),
            daily_rate: 80.0,
        })
        .await
        .unwrap();

    let manager = WorkflowManager::new(db.clone(), audit.clone());

    TestEnv {
        _tmp: tmp,
        db,
        manager,
        audit,
        area_id,
    }
}

fn actor(role: Role) -> CurrentActor {
    CurrentActor {
        id: format!("app_user:{}", role.as_str().to_ascii_lowercase()),
        name: format!("{role} actor"),
        role,
        scope: AreaScope::All,
        nationality_restriction: None,
    }
}

fn scoped_actor(role: Role, scope: &str) -> CurrentActor {
    CurrentActor {
        scope: AreaScope::parse(scope),
        ..actor(role)
    }
}

fn sample_days() -> DayCounts {
    DayCounts {
        normal_days: 22.0,
        overtime_normal_days: 4.0,
        overtime_holiday_days: 1.0,
        overtime_eid_days: 0.0,
    }
}

fn seed_action() -> SeedRecordAction {
    SeedRecordAction {
        worker_id: "W1".into(),
        month: 11,
        year: 2025,
        days: sample_days(),
        initial_stage: Stage::PendingSupervisor,
    }
}

async fn wait_for_audit(audit: &AuditService, record_id: &str, min: usize) -> Vec<AuditEntry> {
    for _ in 0..100 {
        let (items, _) = audit
            .query(&AuditQuery {
                record_id: Some(record_id.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        if items.len() >= min {
            return items;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("expected {min} audit entries for {record_id}");
}

#[tokio::test]
async fn seed_computes_total_and_starts_at_initial_stage() {
    let env = setup().await;
    let outcome = env
        .manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    assert!(outcome.created);
    assert_eq!(outcome.record.key(), "W1-11-2025");
    assert_eq!(outcome.record.status, Stage::PendingSupervisor);
    // 22 + 4×0.5 + 1 = 25
    assert_eq!(outcome.record.total_calculated_days, 25.0);
}

#[tokio::test]
async fn walkthrough_scenario() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    // Supervisor approves → PENDING_GS, total unchanged
    let approved = env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &actor(Role::Supervisor),
        )
        .await
        .unwrap();
    assert_eq!(approved.record.status, Stage::PendingGs);
    assert_eq!(approved.record.total_calculated_days, 25.0);

    // HR (wrong stage) attempts approve → authorization error, status unchanged
    let err = env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &actor(Role::Hr),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::RoleStageMismatch { .. }));

    let records = AttendanceRecordRepository::new(env.db.clone());
    let record = records.find_by_id("W1-11-2025").await.unwrap().unwrap();
    assert_eq!(record.status, Stage::PendingGs);

    // General supervisor rejects with a note → back to PENDING_SUPERVISOR
    let rejected = env
        .manager
        .execute(
            &WorkflowCommand::Reject {
                record_id: "W1-11-2025".into(),
                notes: "missing signature".into(),
            },
            &actor(Role::GeneralSupervisor),
        )
        .await
        .unwrap();
    assert_eq!(rejected.record.status, Stage::PendingSupervisor);
    assert_eq!(
        rejected.record.rejection_notes.as_deref(),
        Some("missing signature")
    );
}

#[tokio::test]
async fn full_chain_reaches_terminal_and_becomes_immutable() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let chain = [
        Role::Supervisor,
        Role::GeneralSupervisor,
        Role::HealthDirector,
        Role::Hr,
        Role::InternalAudit,
        Role::Finance,
        Role::Payroll,
    ];
    let mut stage = Stage::PendingSupervisor;
    for role in chain {
        let outcome = env
            .manager
            .execute(
                &WorkflowCommand::Approve {
                    record_id: "W1-11-2025".into(),
                },
                &actor(role),
            )
            .await
            .unwrap();
        // exactly one step forward, never skipping
        assert_eq!(outcome.record.status.position(), stage.position() + 1);
        stage = outcome.record.status;
    }
    assert_eq!(stage, Stage::Approved);

    // terminal records are immutable, even for admin
    for cmd in [
        WorkflowCommand::Approve {
            record_id: "W1-11-2025".into(),
        },
        WorkflowCommand::Reject {
            record_id: "W1-11-2025".into(),
            notes: "late finding".into(),
        },
        WorkflowCommand::UpdateDays {
            record_id: "W1-11-2025".into(),
            days: sample_days(),
        },
    ] {
        let err = env
            .manager
            .execute(&cmd, &actor(Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::RecordTerminal(_)));
    }
}

#[tokio::test]
async fn reject_at_initial_stage_fails() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let err = env
        .manager
        .execute(
            &WorkflowCommand::Reject {
                record_id: "W1-11-2025".into(),
                notes: "rework".into(),
            },
            &actor(Role::Supervisor),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::AlreadyAtInitialStage(_)));
}

#[tokio::test]
async fn seeding_twice_is_idempotent() {
    let env = setup().await;
    let first = env
        .manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();
    assert!(first.created);

    // same payload again: one stored record, not two, and no clobber
    let second = env
        .manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.record.version, first.record.version);

    let records = AttendanceRecordRepository::new(env.db.clone());
    let all = records.list(&RecordQuery::default(), None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn import_does_not_clobber_an_advanced_record() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();
    env.manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &actor(Role::Supervisor),
        )
        .await
        .unwrap();

    // re-seed with different counts: the advanced record wins
    let mut action = seed_action();
    action.days.normal_days = 10.0;
    let outcome = env
        .manager
        .seed(action, &actor(Role::Admin))
        .await
        .unwrap();
    assert!(!outcome.created);
    assert_eq!(outcome.record.status, Stage::PendingGs);
    assert_eq!(outcome.record.normal_days, 22.0);
}

#[tokio::test]
async fn scope_excludes_other_areas() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let outsider = scoped_actor(Role::Supervisor, "area:somewhere-else");
    let err = env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &outsider,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ScopeDenied(_)));

    // strict read model: the record cannot be observed either
    let err = env
        .manager
        .load_visible("W1-11-2025", &outsider)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ScopeDenied(_)));

    // an explicitly matching scope works, including comma-joined lists
    let insider = scoped_actor(
        Role::Supervisor,
        &format!("area:elsewhere, {}", env.area_id),
    );
    let outcome = env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &insider,
        )
        .await
        .unwrap();
    assert_eq!(outcome.record.status, Stage::PendingGs);
}

#[tokio::test]
async fn nationality_restriction_gates_access() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let mut restricted = actor(Role::Supervisor);
    restricted.nationality_restriction = Some("IN".into());
    let err = env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &restricted,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NationalityRestricted));

    restricted.nationality_restriction = Some("EG".into());
    assert!(env
        .manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &restricted,
        )
        .await
        .is_ok());
}

#[tokio::test]
async fn retried_approve_reports_stale_stage() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let supervisor = actor(Role::Supervisor);
    let cmd = WorkflowCommand::Approve {
        record_id: "W1-11-2025".into(),
    };
    env.manager.execute(&cmd, &supervisor).await.unwrap();

    // replaying the same approve does not double-apply
    let err = env.manager.execute(&cmd, &supervisor).await.unwrap_err();
    assert!(matches!(err, WorkflowError::StaleStage { .. }));

    let record = AttendanceRecordRepository::new(env.db.clone())
        .find_by_id("W1-11-2025")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.status, Stage::PendingGs);
}

#[tokio::test]
async fn edit_while_pending_recomputes_total() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();

    let outcome = env
        .manager
        .execute(
            &WorkflowCommand::UpdateDays {
                record_id: "W1-11-2025".into(),
                days: DayCounts {
                    normal_days: 20.0,
                    overtime_normal_days: 2.0,
                    overtime_holiday_days: 0.0,
                    overtime_eid_days: 1.0,
                },
            },
            &actor(Role::Supervisor),
        )
        .await
        .unwrap();

    assert_eq!(outcome.record.status, Stage::PendingSupervisor);
    assert_eq!(outcome.record.total_calculated_days, 22.0);
}

#[tokio::test]
async fn mutations_are_audited_with_snapshots_and_intact_chain() {
    let env = setup().await;
    env.manager
        .seed(seed_action(), &actor(Role::Supervisor))
        .await
        .unwrap();
    env.manager
        .execute(
            &WorkflowCommand::Approve {
                record_id: "W1-11-2025".into(),
            },
            &actor(Role::Supervisor),
        )
        .await
        .unwrap();

    let entries = wait_for_audit(&env.audit, "W1-11-2025", 2).await;

    // newest first: the approve UPDATE, then the seed INSERT
    let update = &entries[0];
    assert_eq!(update.action, AuditAction::Update);
    assert_eq!(update.table_name, "attendance_record");
    assert_eq!(
        update.old_data.as_ref().unwrap()["status"],
        "PENDING_SUPERVISOR"
    );
    assert_eq!(update.new_data.as_ref().unwrap()["status"], "PENDING_GS");
    let changed: Vec<&str> = update
        .changes
        .as_ref()
        .unwrap()
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert!(changed.contains(&"status"));

    let insert = &entries[1];
    assert_eq!(insert.action, AuditAction::Insert);
    assert!(insert.old_data.is_none());
    assert_eq!(
        insert.new_data.as_ref().unwrap()["worker_id"],
        "W1"
    );
    assert_eq!(
        insert.changed_by.as_deref(),
        Some("app_user:supervisor")
    );

    let verification = env.audit.verify_chain().await.unwrap();
    assert!(verification.chain_intact);
    assert!(verification.total_entries >= 2);
}

//! HTTP API integration tests: actor resolution, role gating and the
//! record lifecycle through the router.

use attendance_server::core::{Config, ImportPolicy, Server, ServerState};
use attendance_server::db;
use attendance_server::db::models::UserCreate;
use attendance_server::db::repository::UserRepository;
use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use shared::models::{AreaScope, Role};
use tower::ServiceExt;

struct TestApp {
    _tmp: tempfile::TempDir,
    router: Router,
    admin_id: String,
    supervisor_id: String,
}

fn test_config(work_dir: &str) -> Config {
    Config {
        work_dir: work_dir.to_string(),
        http_port: 0,
        environment: "test".into(),
        request_timeout_ms: 5000,
        shutdown_timeout_ms: 1000,
        audit_buffer_size: 64,
        import_policy: ImportPolicy::StartAtSupervisor,
    }
}

async fn setup() -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let database = db::init_test_db(tmp.path()).await.unwrap();
    let state = ServerState::with_db(
        test_config(tmp.path().to_str().unwrap()),
        database.clone(),
    );
    state.start_background_tasks().await;

    let users = UserRepository::new(database);
    let admin = users
        .create(UserCreate {
            name: "Admin".into(),
            role: Role::Admin,
            scope: AreaScope::All,
            nationality_restriction: None,
        })
        .await
        .unwrap();
    let supervisor = users
        .create(UserCreate {
            name: "Supervisor".into(),
            role: Role::Supervisor,
            scope: AreaScope::All,
            nationality_restriction: None,
        })
        .await
        .unwrap();

    let router = Server::build_router(state.clone());

    TestApp {
        _tmp: tmp,
        router,
        admin_id: admin.id.unwrap().to_string(),
        supervisor_id: supervisor.id.unwrap().to_string(),
    }
}

fn request(method: &str, uri: &str, actor: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header("x-actor-id", actor);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = setup().await;
    let response = app
        .router
        .clone()
        .oneshot(request("GET", "/api/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_rejects_requests_without_actor_identity() {
    let app = setup().await;
    let response = app
        .router
        .clone()
        .oneshot(request("GET", "/api/records", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .router
        .clone()
        .oneshot(request("GET", "/api/records", Some("app_user:nobody"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn management_routes_require_admin() {
    let app = setup().await;
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/areas",
            Some(&app.supervisor_id),
            Some(r#"{"name":"South District"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn record_lifecycle_over_http() {
    let app = setup().await;

    // admin creates area + worker
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/areas",
            Some(&app.admin_id),
            Some(r#"{"name":"North District"}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let area = json_body(response).await;
    let area_id = area["id"].as_str().unwrap().to_string();

    let worker_payload = format!(
        r#"{{"badge":"W1","name":"A. Hassan","area":"{area_id}","nationality":"EG","daily_rate":80}}"#
    );
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/workers",
            Some(&app.admin_id),
            Some(&worker_payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let worker = json_body(response).await;
    // resolver enriches with the display name
    assert_eq!(worker["area_name"], "North District");
    // advisory base salary = rate × 30
    assert_eq!(worker["base_salary"], 2400.0);

    // supervisor enters the period manually (lenient day-count fields)
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/records",
            Some(&app.supervisor_id),
            Some(r#"{"worker_id":"W1","month":11,"year":2025,"normal_days":"22","overtime_normal_days":4,"overtime_holiday_days":1}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await;
    assert_eq!(created["created"], true);
    assert_eq!(created["record"]["id"], "W1-11-2025");
    assert_eq!(created["record"]["status"], "PENDING_SUPERVISOR");
    assert_eq!(created["record"]["total_calculated_days"], 25.0);

    // supervisor approves
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/records/W1-11-2025/approve",
            Some(&app.supervisor_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let approved = json_body(response).await;
    assert_eq!(approved["record"]["status"], "PENDING_GS");

    // supervisor replays the approve → stale-state conflict (409)
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/records/W1-11-2025/approve",
            Some(&app.supervisor_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let conflict = json_body(response).await;
    assert_eq!(conflict["code"], "E3001");

    // reject without a note → 400
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/records/W1-11-2025/reject",
            Some(&app.admin_id),
            Some(r#"{"notes":"  "}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // listing as supervisor shows the record
    let response = app
        .router
        .clone()
        .oneshot(request(
            "GET",
            "/api/records?month=11&year=2025",
            Some(&app.supervisor_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bulk_import_seeds_and_skips() {
    let app = setup().await;

    let payload = r#"{
        "month": 11,
        "year": 2025,
        "rows": [
            {"worker_id":"W1","worker_name":"A. Hassan","normal_days":22,
             "overtime_normal_days":4,"overtime_holiday_days":1,"overtime_eid_days":0,
             "area":"North District","daily_rate":80},
            {"worker_id":"W2","worker_name":"B. Kumar","normal_days":"26",
             "area":"North District","daily_rate":"85.5"},
            {"worker_id":"","worker_name":"Broken Row","area":"North District","daily_rate":10}
        ]
    }"#;

    // import is admin-gated
    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/import",
            Some(&app.supervisor_id),
            Some(payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .router
        .clone()
        .oneshot(request("POST", "/api/import", Some(&app.admin_id), Some(payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let report = json_body(response).await;
    assert_eq!(report["total"], 3);
    assert_eq!(report["created"], 2);
    assert_eq!(report["failed"], 1);

    // the unseen area was created on demand
    let response = app
        .router
        .clone()
        .oneshot(request("GET", "/api/areas", Some(&app.supervisor_id), None))
        .await
        .unwrap();
    let areas = json_body(response).await;
    assert_eq!(areas.as_array().unwrap().len(), 1);
    assert_eq!(areas[0]["name"], "North District");

    // re-import skips every existing worker/period
    let response = app
        .router
        .clone()
        .oneshot(request("POST", "/api/import", Some(&app.admin_id), Some(payload)))
        .await
        .unwrap();
    let report = json_body(response).await;
    assert_eq!(report["created"], 0);
    assert_eq!(report["skipped"], 2);

    // audit trail is visible to oversight roles only
    let response = app
        .router
        .clone()
        .oneshot(request(
            "GET",
            "/api/audit-log?table_name=worker",
            Some(&app.supervisor_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .router
        .clone()
        .oneshot(request(
            "GET",
            "/api/audit-log?table_name=worker",
            Some(&app.admin_id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

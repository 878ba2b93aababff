use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use nurse_roster::db::DbActorHandle;
use nurse_roster::server::router::{RosterState, roster_router};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    db: DbActorHandle,
    db_path: PathBuf,
}

impl TestApp {
    async fn spawn() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let db_path = std::env::temp_dir().join(format!(
            "nurse-roster-routes-{}-{}-{}.sqlite",
            std::process::id(),
            nanos,
            uuid::Uuid::new_v4()
        ));
        let db = nurse_roster::db::spawn(&format!("sqlite:{}", db_path.display()))
            .await
            .expect("failed to spawn db");
        let app = roster_router(RosterState::new(db.clone()));
        Self { app, db, db_path }
    }

    async fn call(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let req = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .expect("failed to build request");
        let resp = self.app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not JSON")
        };
        (status, value)
    }

    async fn finish(self) {
        self.db.shutdown().await.expect("db shutdown failed");
        for suffix in ["-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.db_path.display()));
        }
        let _ = std::fs::remove_file(&self.db_path);
    }
}

const JANE: &str =
    r#"{"name":"Jane Doe","licenseNumber":"RN123","dob":"1990-01-01","age":"34"}"#;

#[tokio::test]
async fn create_then_list_returns_the_record() {
    let t = TestApp::spawn().await;

    let (status, created) = t.call("POST", "/records", Some(JANE)).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["_id"].as_str().expect("missing _id").to_string();
    assert!(!id.is_empty());
    assert_eq!(created["id"], json!(id));
    assert_eq!(created["name"], "Jane Doe");
    assert_eq!(created["licenseNumber"], "RN123");
    assert_eq!(created["dob"], "1990-01-01");
    assert_eq!(created["age"], "34");

    let (status, listed) = t.call("GET", "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));

    t.finish().await;
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let t = TestApp::spawn().await;
    let (_, created) = t.call("POST", "/records", Some(JANE)).await;
    let id = created["_id"].as_str().unwrap().to_string();

    let (status, updated) = t
        .call(
            "PUT",
            &format!("/records/{id}"),
            Some(r#"{"name":"Jane Smith","licenseNumber":"RN123","dob":"1990-01-01","age":35}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], json!(id));
    assert_eq!(updated["name"], "Jane Smith");
    assert_eq!(updated["age"], "35");

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([updated]));

    t.finish().await;
}

#[tokio::test]
async fn update_of_unknown_id_answers_null() {
    let t = TestApp::spawn().await;
    let id = uuid::Uuid::new_v4();

    let (status, body) = t
        .call("PUT", &format!("/records/{id}"), Some(r#"{"name":"Jane Smith"}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([]));

    t.finish().await;
}

#[tokio::test]
async fn delete_is_idempotent() {
    let t = TestApp::spawn().await;
    let (_, created) = t.call("POST", "/records", Some(JANE)).await;
    let id = created["_id"].as_str().unwrap().to_string();

    for _ in 0..2 {
        let (status, body) = t.call("DELETE", &format!("/records/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Nurse deleted successfully" }));
    }

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([]));

    t.finish().await;
}

#[tokio::test]
async fn malformed_id_is_a_client_error_with_raw_body() {
    let t = TestApp::spawn().await;

    let (status, body) = t
        .call("PUT", "/records/not-an-id", Some(r#"{"name":"x"}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "CastError");
    assert!(body["message"].as_str().unwrap().contains("not-an-id"));

    let (status, body) = t.call("DELETE", "/records/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "CastError");

    t.finish().await;
}

#[tokio::test]
async fn bad_bodies_are_rejected_without_storing() {
    let t = TestApp::spawn().await;

    let (status, body) = t.call("POST", "/records", Some("not-json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "SyntaxError");

    let (status, body) = t
        .call("POST", "/records", Some(r#"{"age":{"years":34}}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "CastError");

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([]));

    t.finish().await;
}

#[tokio::test]
async fn non_object_bodies_are_cast_errors_without_storing() {
    let t = TestApp::spawn().await;

    for body in ["[]", r#"["a"]"#, r#"["Jane","RN1","1990","34"]"#, "42", r#""Jane""#] {
        let (status, resp) = t.call("POST", "/records", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(resp["name"], "CastError", "body {body}");
    }

    let (_, created) = t.call("POST", "/records", Some(JANE)).await;
    let id = created["_id"].as_str().unwrap().to_string();
    let (status, resp) = t
        .call("PUT", &format!("/records/{id}"), Some(r#"["Jane Smith"]"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["name"], "CastError");

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([created]));

    t.finish().await;
}

#[tokio::test]
async fn empty_body_creates_a_blank_record() {
    let t = TestApp::spawn().await;

    let (status, created) = t.call("POST", "/records", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(created["_id"].as_str().is_some());
    assert_eq!(created["name"], Value::Null);
    assert_eq!(created["licenseNumber"], Value::Null);

    t.finish().await;
}

#[tokio::test]
async fn legacy_path_serves_the_same_records() {
    let t = TestApp::spawn().await;

    let (status, created) = t.call("POST", "/api/nurses", Some(JANE)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = t.call("GET", "/records", None).await;
    assert_eq!(listed, json!([created.clone()]));

    let id = created["_id"].as_str().unwrap();
    let (status, _) = t.call("DELETE", &format!("/api/nurses/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = t.call("GET", "/api/nurses", None).await;
    assert_eq!(listed, json!([]));

    t.finish().await;
}

#[tokio::test]
async fn unknown_routes_are_not_found_and_request_id_is_echoed() {
    let t = TestApp::spawn().await;

    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/nope")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-42")
    );

    let resp = t
        .app
        .clone()
        .oneshot(Request::builder().uri("/records").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(resp.headers().get("x-request-id").is_some());

    t.finish().await;
}

#[tokio::test]
async fn storage_failure_after_shutdown_is_reported_as_client_error() {
    let t = TestApp::spawn().await;
    t.db.shutdown().await.unwrap();

    let (status, body) = t.call("POST", "/records", Some(JANE)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "StoreUnavailable");

    t.finish().await;
}

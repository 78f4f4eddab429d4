//! Operational routes: health, readiness, version, API docs, body limit.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, BODY_LIMIT};
use serde_json::json;

#[tokio::test]
async fn health_returns_ok() {
    let (_state, app) = build_test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn ready_reports_memory_store() {
    let (_state, app) = build_test_app();
    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["database"], "memory");
}

#[tokio::test]
async fn version_reports_package() {
    let (_state, app) = build_test_app();
    let json = body_json(get(&app, "/version").await).await;
    assert_eq!(json["name"], "jobdetails");
}

#[tokio::test]
async fn api_docs_describe_entity_schemas() {
    let (_state, app) = build_test_app();
    let response = get(&app, "/v3/api-docs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["components"]["schemas"]["Title"].is_object());
    assert!(json["components"]["schemas"]["Company"].is_object());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let (_state, app) = build_test_app();
    let response = post_json(&app, "/api/titles", json!({ "name": "x".repeat(BODY_LIMIT + 1) })).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

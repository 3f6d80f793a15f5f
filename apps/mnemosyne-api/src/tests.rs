//! 路由级测试（内存存储 + oneshot）。

use crate::middleware::presented_api_key;
use crate::{AppState, Stores, build_app};
use axum::{
    Router,
    body::Body,
    http::{HeaderMap, HeaderValue, Request, StatusCode, header},
};
use bytes::Bytes;
use http_body_util::BodyExt;
use mnemosyne_auth::ApiKeyGate;
use serde_json::{Value, json};
use tower::ServiceExt;

const API_KEY: &str = "test-key";

fn app() -> Router {
    build_app(AppState::new(
        Stores::in_memory(),
        ApiKeyGate::new([API_KEY]),
        None,
    ))
}

async fn call(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, API_KEY)
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes: Bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json");
    (status, value)
}

async fn sign_up(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = call(
        app,
        "/sign-up",
        json!({ "username": "someone", "email": email, "password": "pw-123", "role": role }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_str().expect("id").to_string()
}

#[test]
fn api_key_accepts_raw_and_bearer() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer k1"));
    assert_eq!(presented_api_key(&headers), Some("k1"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("k1"));
    assert_eq!(presented_api_key(&headers), Some("k1"));
}

#[tokio::test]
async fn health_needs_no_api_key() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("x-trace-id"));
}

#[tokio::test]
async fn missing_api_key_is_unauthenticated() {
    let request = Request::builder()
        .method("POST")
        .uri("/create-workspace")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "W1" }).to_string()))
        .expect("request");
    let response = app().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body["error"]["code"], "AUTH.UNAUTHENTICATED");
}

#[tokio::test]
async fn sign_up_then_login() {
    let app = app();
    sign_up(&app, "a@example.com", "user").await;

    let (status, body) = call(
        &app,
        "/login",
        json!({ "email": "a@example.com", "password": "pw-123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "a@example.com");
    assert_eq!(body["data"]["currentWorkspace"], "null");
    assert_ne!(body["data"]["lastLogin"], "null");
    assert!(body["data"].get("passwordHash").is_none());

    let (status, body) = call(
        &app,
        "/login",
        json!({ "email": "a@example.com", "password": "nope" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "invalid password");
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let app = app();
    sign_up(&app, "a@example.com", "user").await;
    let (status, body) = call(
        &app,
        "/sign-up",
        json!({ "username": "b", "email": "a@example.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE.CONFLICT");
}

#[tokio::test]
async fn malformed_identifiers_are_bad_requests() {
    let app = app();
    let (status, body) = call(&app, "/get-node", json!({ "id": "not-a-uuid" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID.REQUEST");

    let (status, _) = call(
        &app,
        "/sign-up",
        json!({ "username": "u", "email": "u@example.com", "password": "pw", "workspaceId": "garbage" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(
        &app,
        "/sign-up",
        json!({ "username": "u", "email": "u@example.com", "password": "pw", "role": "root" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hierarchy_scenario_over_api_prefix() {
    let app = app();
    let admin = sign_up(&app, "admin@example.com", "admin").await;

    let (_, workspace) = call(&app, "/api/create-workspace", json!({ "name": "W1" })).await;
    let workspace_id = workspace["data"]["id"].as_str().expect("id").to_string();
    let (_, grid) = call(
        &app,
        "/api/create-grid",
        json!({ "name": "G1", "workspaceId": workspace_id }),
    )
    .await;
    let grid_id = grid["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = call(
        &app,
        "/api/create-node",
        json!({
            "name": "N1",
            "gridId": grid_id,
            "location": { "latitude": 10.0, "longitude": 20.0 },
            "createdBy": admin,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "/api/get-nodes-by-grid", json!({ "gridId": grid_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    let node = &body["data"]["items"][0];
    assert_eq!(node["name"], "N1");
    assert_eq!(node["active"], true);
    assert_eq!(node["location"]["latitude"], 10.0);
    assert_eq!(node["location"]["longitude"], 20.0);
}

#[tokio::test]
async fn create_node_without_location_fails() {
    let app = app();
    let (status, body) = call(
        &app,
        "/create-node",
        json!({
            "name": "N1",
            "gridId": uuid::Uuid::new_v4().to_string(),
            "createdBy": uuid::Uuid::new_v4().to_string(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "location required");
}

#[tokio::test]
async fn non_admin_delete_node_is_forbidden() {
    let app = app();
    let user = sign_up(&app, "u@example.com", "user").await;
    let (status, body) = call(
        &app,
        "/delete-node",
        json!({ "nodeId": uuid::Uuid::new_v4().to_string(), "currentUser": user }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "AUTH.FORBIDDEN");
}

#[tokio::test]
async fn non_admin_update_user_is_forbidden_before_validation() {
    let app = app();
    let user = sign_up(&app, "u@example.com", "user").await;
    let target = sign_up(&app, "t@example.com", "user").await;

    for fields in [
        json!({ "id": target, "email": "t@example.com", "username": "t", "role": "" }),
        json!({ "id": "not-a-uuid", "email": "t@example.com", "username": "t", "role": "admin" }),
        json!({ "id": target, "email": "", "username": "t", "role": "user", "currentGrid": "bogus" }),
    ] {
        let (status, body) = call(
            &app,
            "/update-user",
            json!({ "currentUser": user, "user": fields }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "AUTH.FORBIDDEN");
    }

    let admin = sign_up(&app, "admin@example.com", "admin").await;
    let (status, body) = call(
        &app,
        "/update-user",
        json!({
            "currentUser": admin,
            "user": { "id": target, "email": "t@example.com", "username": "t", "role": "" },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID.REQUEST");
}

#[tokio::test]
async fn non_admin_update_device_is_forbidden_before_validation() {
    let app = app();
    let user = sign_up(&app, "u@example.com", "user").await;
    let admin = sign_up(&app, "admin@example.com", "admin").await;
    call(
        &app,
        "/create-device",
        json!({ "deviceKey": "dev-1", "deviceType": "tracker", "createdBy": admin }),
    )
    .await;

    let request = |actor: &str, node_id: &str| {
        json!({
            "deviceKey": "dev-1",
            "location": { "latitude": 95.0, "longitude": 0.0 },
            "nodeId": node_id,
            "currentUser": actor,
        })
    };
    let node_id = uuid::Uuid::new_v4().to_string();

    let (status, body) = call(&app, "/update-device", request(&user, &node_id)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "AUTH.FORBIDDEN");
    let (status, _) = call(&app, "/update-device", request(&user, "not-a-uuid")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(
        &app,
        "/delete-device",
        json!({ "deviceId": "not-a-uuid", "currentUser": user }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, "/update-device", request(&admin, &node_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID.REQUEST");
}

#[tokio::test]
async fn self_report_accepts_updated_by() {
    let app = app();
    let user = sign_up(&app, "u@example.com", "user").await;
    let node_id = uuid::Uuid::new_v4().to_string();
    call(
        &app,
        "/create-device",
        json!({ "deviceKey": "dev-1", "deviceType": "tracker", "createdBy": user }),
    )
    .await;

    let (status, body) = call(
        &app,
        "/report-device-location",
        json!({
            "apiKey": "dev-1",
            "location": { "latitude": 1.0, "longitude": 2.0 },
            "nodeId": node_id,
            "updatedBy": user,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["updatedBy"], user);
}

#[tokio::test]
async fn device_self_report_and_guarded_update() {
    let app = app();
    let user = sign_up(&app, "u@example.com", "user").await;
    let node_id = uuid::Uuid::new_v4().to_string();

    let (status, device) = call(
        &app,
        "/create-device",
        json!({ "deviceKey": "dev-1", "deviceType": "tracker", "createdBy": user }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(device["data"]["location"], Value::Null);
    let device_id = device["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = call(
        &app,
        "/update-device",
        json!({
            "deviceKey": "dev-1",
            "location": { "latitude": 3.0, "longitude": 4.0 },
            "nodeId": node_id,
            "currentUser": user,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call(
        &app,
        "/report-device-location",
        json!({
            "deviceKey": "dev-1",
            "location": { "latitude": 1.0, "longitude": 2.0 },
            "nodeId": node_id,
            "currentUser": user,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "/get-device", json!({ "id": device_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"]["latitude"], 1.0);
    assert_eq!(body["data"]["location"]["longitude"], 2.0);
    assert_eq!(body["data"]["nodeId"], node_id);
}

#[tokio::test]
async fn out_of_range_location_is_rejected() {
    let app = app();
    let (status, _) = call(
        &app,
        "/create-node",
        json!({
            "name": "N1",
            "gridId": uuid::Uuid::new_v4().to_string(),
            "location": { "latitude": 95.0, "longitude": 0.0 },
            "createdBy": uuid::Uuid::new_v4().to_string(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_requires_api_key() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .header(header::AUTHORIZATION, API_KEY)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

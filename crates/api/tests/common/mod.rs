#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pvz_core::memory::InMemoryStore;
use pvz_core::store::Stores;
use serde_json::Value;
use tower::ServiceExt;

use pvz_api::auth::jwt::JwtConfig;
use pvz_api::config::{LogFormat, ServerConfig};
use pvz_api::metrics::Metrics;
use pvz_api::router::build_app_router;
use pvz_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        metrics_enabled: true,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> Router {
    let state = AppState {
        stores: Stores::from_backend(Arc::new(InMemoryStore::new())),
        config: Arc::new(config.clone()),
        metrics: Arc::new(Metrics::new().expect("metrics registry")),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::POST, uri, token, None).await
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::GET, uri, token, None).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: &Router, uri: &str, token: Option<&str>, raw: &str) -> Response {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::from(raw.to_owned())).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Obtain a token for `role` through `/dummyLogin`.
pub async fn token_for(app: &Router, role: &str) -> String {
    let response = post_json(app, "/dummyLogin", None, serde_json::json!({ "role": role })).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a pickup point as a moderator and return its id.
pub async fn create_pvz(app: &Router, city: &str) -> String {
    let moderator = token_for(app, "moderator").await;
    let response = post_json(
        app,
        "/pvz",
        Some(&moderator),
        serde_json::json!({ "city": city }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

pub async fn open_reception(app: &Router, employee: &str, pvz_id: &str) -> Response {
    post_json(
        app,
        "/receptions",
        Some(employee),
        serde_json::json!({ "pvzId": pvz_id }),
    )
    .await
}

pub async fn add_product(app: &Router, employee: &str, pvz_id: &str, kind: &str) -> Response {
    post_json(
        app,
        "/products",
        Some(employee),
        serde_json::json!({ "type": kind, "pvzId": pvz_id }),
    )
    .await
}

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hopelink_api::config::ServerConfig;
use hopelink_api::middleware::actor::ACTOR_HEADER;
use hopelink_api::router::build_app_router;
use hopelink_api::state::AppState;
use hopelink_api::ws::WsManager;
use hopelink_events::{EventBus, StatusCache};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        cache_resync_secs: 300,
    }
}

/// Build the application state around the given pool.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(WsManager::new()),
        event_bus: Arc::new(EventBus::default()),
        status_cache: Arc::new(StatusCache::new()),
    }
}

/// Build the full application router with all middleware layers.
///
/// Uses the same builder as `main.rs` so integration tests exercise the
/// production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_state(pool).0
}

/// Like [`build_test_app`], but also returns the state so tests can
/// subscribe to the event bus or inspect the cache.
pub fn build_test_app_with_state(pool: PgPool) -> (Router, AppState) {
    let state = test_state(pool);
    let app = build_app_router(state.clone(), &test_config());
    (app, state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    actor: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// POST without an `x-actor-role` header.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

/// POST acting as `actor`.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    actor: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), Some(body)).await
}

/// PUT acting as `actor`.
pub async fn put_json_as(
    app: Router,
    uri: &str,
    actor: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(actor), Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a profile and return its id.
pub async fn create_profile(app: Router, name: &str, role: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/profiles",
        serde_json::json!({ "full_name": name, "role": role }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a donation as a donor and return its id.
pub async fn create_donation(app: Router, title: &str) -> i64 {
    let response = post_json_as(
        app,
        "/api/v1/donations",
        "donor",
        serde_json::json!({ "title": title }),
    )
    .await;
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Move a row to `status` acting as `actor`, returning the response body.
pub async fn set_status(
    app: Router,
    resource: &str,
    id: i64,
    actor: &str,
    status: &str,
) -> Response<Body> {
    put_json_as(
        app,
        &format!("/api/v1/{resource}/{id}/status"),
        actor,
        serde_json::json!({ "status": status }),
    )
    .await
}

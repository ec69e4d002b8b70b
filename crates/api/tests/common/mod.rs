#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vuement_api::auth::jwt::{generate_access_token, JwtConfig};
use vuement_api::config::{ServerConfig, StoreBackend};
use vuement_api::router::build_app_router;
use vuement_api::state::AppState;
use vuement_core::permissions::{
    GROUP_ADMIN, PERMISSION_CREATE, PERMISSION_DELETE, PERMISSION_UPDATE,
};
use vuement_core::service::ComponentService;
use vuement_db::MemoryComponentStore;

/// Build a test `ServerConfig` with safe defaults.
///
/// Allows any CORS origin (matching the default) and uses the in-memory
/// store so tests need no database.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        store_timeout_secs: 10,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// The returned store handle lets tests inspect what was persisted.
pub fn build_test_app_with_store() -> (Router, Arc<MemoryComponentStore>) {
    let config = test_config();
    let store = Arc::new(MemoryComponentStore::new());
    let components = ComponentService::with_defaults(store.clone());
    let state = AppState::new(config.clone(), components);
    (build_app_router(state, &config), store)
}

pub fn build_test_app() -> Router {
    build_test_app_with_store().0
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_with(groups: &[&str], permissions: &[&str]) -> String {
    generate_access_token("test-user", groups, permissions, &test_config().jwt)
        .expect("token generation should succeed")
}

/// A token carrying the admin group and every component permission.
pub fn admin_token() -> String {
    token_with(
        &[GROUP_ADMIN],
        &[PERMISSION_CREATE, PERMISSION_UPDATE, PERMISSION_DELETE],
    )
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, token, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response {
    send(app, Method::DELETE, uri, token, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

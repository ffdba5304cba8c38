#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use sitegate::config::{
    AppConfig, Environment, GateConfig, SecurityConfig, ServerConfig,
};
use sitegate::database::{MemorySettingsStore, Settings, SettingsStore, StoreError};
use sitegate::state::AppState;

pub const TEST_SECRET: &str = "correctSecret";

/// Config with known values, independent of the process environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        server: ServerConfig { port: 0, enable_cors: false },
        gate: GateConfig {
            settings_read_timeout_ms: 200,
            cache_ttl_secs: 0,
            extra_bypass_prefixes: Vec::new(),
        },
        security: SecurityConfig {
            admin_secret: TEST_SECRET.to_string(),
            token_secret: "test-token-secret".to_string(),
            token_expiry_hours: 1,
        },
    }
}

/// App over a fresh in-memory store. Returns the store too, so tests can
/// seed or inspect it directly.
pub fn test_app() -> (Router, Arc<MemorySettingsStore>) {
    let store = Arc::new(MemorySettingsStore::new());
    let state = AppState::new(&test_config(), store.clone());
    (sitegate::app(state), store)
}

/// App whose settings store fails every operation, for fail-open tests.
pub fn broken_app() -> Router {
    let state = AppState::new(&test_config(), Arc::new(BrokenStore));
    sitegate::app(state)
}

pub struct BrokenStore;

#[async_trait::async_trait]
impl SettingsStore for BrokenStore {
    async fn read(&self) -> Result<Option<Settings>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn write(&self, _maintenance_mode: bool) -> Result<Settings, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub async fn get(app: &Router, path: &str) -> Result<Response<Body>> {
    let req = Request::builder().uri(path).body(Body::empty())?;
    Ok(app.clone().oneshot(req).await?)
}

pub async fn get_with_host(app: &Router, path: &str, host: &str) -> Result<Response<Body>> {
    let req = Request::builder().uri(path).header("host", host).body(Body::empty())?;
    Ok(app.clone().oneshot(req).await?)
}

pub async fn post_json(
    app: &Router,
    path: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Result<Response<Body>> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = builder.body(Body::from(serde_json::to_vec(body)?))?;
    Ok(app.clone().oneshot(req).await?)
}

pub async fn delete_with_token(
    app: &Router,
    path: &str,
    token: &str,
) -> Result<Response<Body>> {
    let req = Request::builder()
        .method("DELETE")
        .uri(path)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())?;
    Ok(app.clone().oneshot(req).await?)
}

pub async fn get_with_token(app: &Router, path: &str, token: &str) -> Result<Response<Body>> {
    let req = Request::builder()
        .uri(path)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())?;
    Ok(app.clone().oneshot(req).await?)
}

pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Log in with the test secret and return the session token.
pub async fn login(app: &Router) -> Result<String> {
    let res = post_json(
        app,
        "/api/auth/login",
        None,
        &serde_json::json!({ "secret": TEST_SECRET }),
    )
    .await?;
    anyhow::ensure!(res.status() == 200, "login failed: {}", res.status());

    let body = body_json(res).await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("login response missing token"))
}

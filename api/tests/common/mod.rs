#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use iam_auth::{
    config::SessionConfig,
    models::user::User,
    rest,
    session::SessionIssuer,
    store::{SqliteUserStore, StoreError, UserStore},
    AppState,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub async fn memory_store() -> SqliteUserStore {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteUserStore::new(db);
    store.migrate().await.unwrap();
    store
}

/// File-backed database shared by several pooled connections, so concurrent
/// requests really run in parallel. Keep the `TempDir` alive for the test.
pub async fn file_store(max_connections: u32) -> (SqliteUserStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("users.db"))
        .create_if_missing(true);
    let db = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .unwrap();
    let store = SqliteUserStore::new(db);
    store.migrate().await.unwrap();
    (store, dir)
}

pub fn app_with(store: Arc<dyn UserStore>) -> Router {
    app_with_session(store, SessionConfig::new(SECRET))
}

pub fn app_with_session(store: Arc<dyn UserStore>, session: SessionConfig) -> Router {
    rest::router(AppState::new(store, SessionIssuer::new(session)))
}

pub async fn build_app() -> (Router, SqliteUserStore) {
    let store = memory_store().await;
    (app_with(Arc::new(store.clone())), store)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&serde_json::json!({"email": email, "password": password}))
                .unwrap(),
        ))
        .unwrap()
}

pub fn details_request(path_id: &str, uid: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("/users/{path_id}"))
        .header("platform", "android")
        .header("app-name", "pocket")
        .header("x-auth-deviceid", "device-9");
    if let Some(uid) = uid {
        builder = builder.header("x-auth-uid", uid);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn user_count(store: &SqliteUserStore) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(store.pool())
        .await
        .unwrap()
}

/// Store whose every call fails the way an unreachable database would.
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn find_by_email(&self, _email: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i64) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _email: &str, _password: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Lookups report "not found" but inserts fail.
pub struct ReadOnlyStore;

#[async_trait]
impl UserStore for ReadOnlyStore {
    async fn find_by_email(&self, _email: &str) -> Result<User, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn find_by_id(&self, _id: i64) -> Result<User, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn create(&self, _email: &str, _password: &str) -> Result<User, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

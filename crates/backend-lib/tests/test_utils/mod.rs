//! Test utilities for the user-management service tests
//!
//! Builds an `AppState` over an in-memory store seeded with one user and
//! offers small helpers for driving the router with `oneshot`.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use usermgmt_backend_lib::{
    auth::hash_password,
    config::Settings,
    router::create_router,
    storage::{CredentialStore, MemoryStore, UserRecord},
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestEnv {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub alice: UserRecord,
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.token.secret = TEST_SECRET.to_string();
    settings
}

/// Sets up a router over a store holding `alice` / `secret`
pub async fn setup_test_env() -> TestEnv {
    let store = Arc::new(MemoryStore::new());
    let alice = store
        .save(UserRecord::new(
            "alice",
            "alice@example.com",
            hash_password("secret").expect("hashing should succeed"),
            "role-user",
        ))
        .await
        .expect("seeding should succeed");

    let state = Arc::new(
        AppState::new(store.clone(), &test_settings()).expect("Failed to create AppState for test"),
    );
    let app = create_router(state.clone());

    TestEnv {
        state,
        store,
        app,
        alice,
    }
}

/// Send one request through the router
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = bearer {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// Collect a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ==============================
// tests/user_admin.rs
// ==============================
//! Account management routes and the start-up bootstrap user
mod test_utils;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use test_utils::{json_body, send, setup_test_env, test_settings, TestEnv};
use usermgmt_backend_lib::{
    config::BootstrapUser, router::create_router, storage::CredentialStore, AppState,
};

fn bearer(env: &TestEnv) -> String {
    let token = env.state.tokens.issue(&env.alice.id, "alice").unwrap();
    format!("Bearer {token}")
}

async fn create_bob(env: &TestEnv) -> String {
    let response = send(
        &env.app,
        Method::POST,
        "/user",
        Some(&bearer(env)),
        Some(json!({
            "login": "bob",
            "password": "bobSecret",
            "email": "bob@example.com",
            "role": "role-user",
            "firstname": "Bob"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User created");
    body["data"]["userId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_created_user_can_sign_in() {
    let env = setup_test_env().await;
    let bob_id = create_bob(&env).await;

    let response = send(
        &env.app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "login": "bob", "password": "bobSecret" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["userId"], bob_id.as_str());
}

#[tokio::test]
async fn test_create_user_validation_and_uniqueness() {
    let env = setup_test_env().await;
    let auth = bearer(&env);

    let response = send(
        &env.app,
        Method::POST,
        "/user",
        Some(&auth),
        Some(json!({ "login": "bob", "password": "x", "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Bad arguments.");

    let response = send(
        &env.app,
        Method::POST,
        "/user",
        Some(&auth),
        Some(json!({
            "login": "alice",
            "password": "x",
            "email": "other@example.com",
            "role": "role-user"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Login already exists.");

    let response = send(
        &env.app,
        Method::POST,
        "/user",
        None,
        Some(json!({
            "login": "carol",
            "password": "x",
            "email": "carol@example.com",
            "role": "role-user"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(env.store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_find_user_by_login_and_email() {
    let env = setup_test_env().await;
    let bob_id = create_bob(&env).await;
    let auth = bearer(&env);

    for uri in ["/user/login/bob", "/user/email/bob@example.com"] {
        let response = send(&env.app, Method::GET, uri, Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = json_body(response).await;
        assert_eq!(body["data"]["userId"], bob_id.as_str());
        assert_eq!(body["data"]["firstname"], "Bob");
        assert!(body["data"].get("passwordHash").is_none());
    }

    for uri in ["/user/login/nobody", "/user/email/nobody@example.com"] {
        let response = send(&env.app, Method::GET, uri, Some(&auth), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_update_user_profile() {
    let env = setup_test_env().await;
    let bob_id = create_bob(&env).await;

    let response = send(
        &env.app,
        Method::PUT,
        &format!("/user/{bob_id}"),
        Some(&bearer(&env)),
        Some(json!({ "lastname": "Builder", "avatar": "bob.png" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User updated");
    assert_eq!(body["data"]["firstname"], "Bob");
    assert_eq!(body["data"]["lastname"], "Builder");
    assert_eq!(body["data"]["avatar"], "bob.png");

    let response = send(
        &env.app,
        Method::PUT,
        "/user/missing",
        Some(&bearer(&env)),
        Some(json!({ "lastname": "Nobody" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let env = setup_test_env().await;
    let bob_id = create_bob(&env).await;
    let uri = format!("/user/{bob_id}");
    let auth = bearer(&env);

    let response = send(&env.app, Method::DELETE, &uri, Some(&auth), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User deleted");
    assert_eq!(body["data"]["userId"], bob_id.as_str());

    let response = send(&env.app, Method::GET, &uri, Some(&auth), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = send(&env.app, Method::DELETE, &uri, Some(&auth), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bootstrap_user_signs_in_on_memory_store() {
    let mut settings = test_settings();
    settings.bootstrap = Some(BootstrapUser {
        login: "admin".to_string(),
        email: "admin@example.com".to_string(),
        password: "changeme".to_string(),
        role: "admin".to_string(),
    });

    let state = Arc::new(AppState::from_settings(&settings).await.unwrap());
    let app = create_router(state);

    let response = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "login": "admin", "password": "changeme" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Access granted");
}

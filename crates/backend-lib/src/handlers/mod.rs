// ============================
// crates/backend-lib/src/handlers/mod.rs
// ============================
//! HTTP handlers. Each one validates its input, calls into the services and
//! wraps the result in `{ message, data }` with status 200.
use axum::Json;
use serde_json::{json, Value};

pub mod auth;
pub mod users;

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// crates/backend-lib/src/middleware/auth.rs

//! Bearer-token gate for protected routes.
//!
//! Reads `Authorization: Bearer <token>`, verifies the token and stores the
//! caller's identity in the request extensions as [`AuthContext`]. The gate
//! never touches the credential store.
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, AppState};

/// Message returned when the `Authorization` header is absent
pub const MISSING_HEADER: &str = "Not authenticated.";

/// Verified identity of the caller, valid for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
}

/// Token part of an `Authorization` value: the second space-separated
/// segment, or `""` when there is none.
pub fn bearer_token(header: &str) -> &str {
    header.split(' ').nth(1).unwrap_or("")
}

/// Reject the request unless it carries a valid bearer token
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(header) = request.headers().get(AUTHORIZATION) else {
        return Err(AppError::Unauthenticated(MISSING_HEADER.to_string()));
    };
    // a non-ASCII header cannot hold a token; let it fail as an empty one
    let token = bearer_token(header.to_str().unwrap_or_default());

    let identity = state.auth.decode_token(token)?;
    tracing::debug!(user_id = %identity.user_id, "request authenticated");

    request.extensions_mut().insert(AuthContext {
        user_id: identity.user_id,
    });
    Ok(next.run(request).await)
}

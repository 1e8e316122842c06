// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Sign-in and password update.
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use usermgmt_common::{
    ApiResponse, SigninRequest, SigninResponse, UpdatePasswordRequest, UserIdResponse,
};

use crate::{error::AppError, middleware::AuthContext, AppState};

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SigninResponse>>, AppError> {
    let Json(body) = payload.map_err(|_| AppError::bad_arguments())?;
    if body.login.is_empty() || body.password.is_empty() {
        return Err(AppError::bad_arguments());
    }

    let response = state.auth.signin(&body.login, &body.password).await?;
    Ok(Json(ApiResponse::new("Access granted", response)))
}

/// `PUT /password`, behind the auth gate
pub async fn update_password(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<AuthContext>,
    payload: Result<Json<UpdatePasswordRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserIdResponse>>, AppError> {
    let Json(body) = payload.map_err(|_| AppError::bad_arguments())?;
    if body.password.is_empty() {
        return Err(AppError::bad_arguments());
    }

    let response = state
        .auth
        .update_password(&ctx.user_id, body.password)
        .await?;
    Ok(Json(ApiResponse::new("Password updated", response)))
}

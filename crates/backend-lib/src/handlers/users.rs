// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! User records: lookup, listing and account management. Every route here
//! sits behind the auth gate.
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use usermgmt_common::{
    ApiResponse, CreateUserRequest, PageQuery, UpdateUserRequest, UserIdResponse, UserView,
    UsersPage,
};

use crate::accounts::{self, USER_NOT_FOUND};
use crate::storage::UserRecord;
use crate::{error::AppError, AppState};

pub const PAGINATION_OUT_OF_BOUNDS: &str = "Pagination out of bounds.";

/// `GET /user/{user_id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserView>>, AppError> {
    if user_id.is_empty() {
        return Err(AppError::bad_arguments());
    }

    found(state.store.find_by_id(&user_id).await?)
}

/// `GET /user/login/{login}`
pub async fn find_user_by_login(
    State(state): State<Arc<AppState>>,
    Path(login): Path<String>,
) -> Result<Json<ApiResponse<UserView>>, AppError> {
    if login.is_empty() {
        return Err(AppError::bad_arguments());
    }
    found(state.store.find_by_login(&login).await?)
}

/// `GET /user/email/{email}`
pub async fn find_user_by_email(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<UserView>>, AppError> {
    if email.is_empty() {
        return Err(AppError::bad_arguments());
    }
    found(state.store.find_by_email(&email).await?)
}

fn found(user: Option<UserRecord>) -> Result<Json<ApiResponse<UserView>>, AppError> {
    let user = user.ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
    Ok(Json(ApiResponse::new("User found", user.view())))
}

/// `POST /user`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserIdResponse>>, AppError> {
    let Json(body) = payload.map_err(|_| AppError::bad_arguments())?;
    let user = accounts::create_user(state.store.as_ref(), body).await?;
    Ok(Json(ApiResponse::new(
        "User created",
        UserIdResponse { user_id: user.id },
    )))
}

/// `PUT /user/{user_id}`
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserView>>, AppError> {
    let Json(body) = payload.map_err(|_| AppError::bad_arguments())?;
    let user = accounts::update_user(state.store.as_ref(), &user_id, body).await?;
    Ok(Json(ApiResponse::new("User updated", user.view())))
}

/// `DELETE /user/{user_id}`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserIdResponse>>, AppError> {
    let response = accounts::delete_user(state.store.as_ref(), &user_id).await?;
    Ok(Json(ApiResponse::new("User deleted", response)))
}

/// `GET /users?page=<n>&perPage=<n>`, pages are 1-based
pub async fn get_users(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<UsersPage>>, AppError> {
    let Query(query) = query.map_err(|_| AppError::bad_arguments())?;
    let (page, per_page) = match (query.page, query.per_page) {
        (Some(page), Some(per_page)) if page > 0 && per_page > 0 => (page, per_page),
        _ => return Err(AppError::bad_arguments()),
    };

    let count = state.store.count().await?;
    let skip = per_page
        .checked_mul(page - 1)
        .filter(|skip| *skip < count)
        .ok_or_else(|| AppError::BadRequest(PAGINATION_OUT_OF_BOUNDS.to_string()))?;

    let users = state.store.list(skip, per_page).await?;
    Ok(Json(ApiResponse::new(
        "Users found",
        UsersPage {
            users: users.iter().map(|u| u.view()).collect(),
            page_count: count.div_ceil(per_page),
        },
    )))
}

// ================
// crates/common/src/lib.rs
// ================
//! Request and response bodies shared between the user-management service
//! and its clients.
//!
//! Field names follow the JSON wire format (`userId`, `perPage`, ...), so
//! every struct is `camelCase` on the wire.

use serde::{Deserialize, Serialize};

/// Body of `POST /login`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SigninRequest {
    /// User login
    #[serde(default)]
    pub login: String,
    /// Plaintext password
    #[serde(default)]
    pub password: String,
}

/// Result of a successful sign-in
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    /// Signed bearer token
    pub token: String,
    /// Id of the authenticated user
    pub user_id: String,
}

/// Body of `PUT /password`. The target user comes from the bearer token.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdatePasswordRequest {
    /// New plaintext password
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /user`. `login`, `password`, `email` and `role` are
/// required; the profile fields are optional.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
    /// Reference into the role service
    #[serde(default)]
    pub role: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub avatar: Option<String>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Body of `PUT /user/{userId}`. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub avatar: Option<String>,
    pub role: Option<String>,
}

/// Identifies the user an operation applied to
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdResponse {
    pub user_id: String,
}

/// Public projection of a user record; never carries the password hash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: String,
    pub login: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Query string of `GET /users`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// One page of users
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UsersPage {
    pub users: Vec<UserView>,
    pub page_count: u64,
}

/// Envelope for every successful response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiResponse<T> {
    /// Human readable outcome, e.g. "Access granted"
    pub message: String,
    /// Operation payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Body of every error response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    /// Client-facing message
    pub message: String,
    /// Stable machine-readable code, e.g. `AUTH_001`
    pub code: String,
}

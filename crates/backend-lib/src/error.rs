// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use usermgmt_common::ErrorBody;

/// Message used for every missing or empty required input.
pub const BAD_ARGUMENTS: &str = "Bad arguments.";

/// Application error kinds. Every failure surfaced by the service maps to
/// exactly one HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty caller input (400)
    #[error("{0}")]
    BadRequest(String),

    /// Credential mismatch or missing/expired/invalid token (401)
    #[error("{0}")]
    Unauthenticated(String),

    /// Lookup miss where the entity was expected to exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Hashing/signing failure or anything unclassified (500)
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn bad_arguments() -> Self {
        AppError::BadRequest(BAD_ARGUMENTS.to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "VAL_001",
            AppError::Unauthenticated(_) => "AUTH_001",
            AppError::NotFound(_) => "NF_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Message safe to hand to a client. Server-side failures are collapsed
    /// into a generic message; the detail only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::Unauthenticated(msg)
            | AppError::NotFound(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            message: self.client_message(),
            code: self.error_code().to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {err}"))
    }
}

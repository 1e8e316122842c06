// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! The `AuthService` trait: sign-in, password update and token decoding.
use async_trait::async_trait;
use usermgmt_common::{SigninResponse, UserIdResponse};

use crate::error::AppError;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check `login`/`password` against the store and issue a token
    async fn signin(&self, login: &str, password: &str) -> Result<SigninResponse, AppError>;

    /// Re-hash and persist a new password for `user_id`
    async fn update_password(
        &self,
        user_id: &str,
        password: String,
    ) -> Result<UserIdResponse, AppError>;

    /// Verify a bearer token and return the user it was issued to
    fn decode_token(&self, token: &str) -> Result<UserIdResponse, AppError>;
}

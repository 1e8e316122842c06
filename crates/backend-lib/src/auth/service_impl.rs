// =============
// crates/backend-lib/src/auth/service_impl.rs
// =============
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use usermgmt_common::{SigninResponse, UserIdResponse};

use super::password::{hash_password_secure, verify_password_blocking};
use super::{AuthService, TokenService};
use crate::error::AppError;
use crate::storage::CredentialStore;

pub const USER_NOT_FOUND: &str = "User not found";
pub const WRONG_PASSWORD: &str = "Wrong password";

/// Store-backed `AuthService`
pub struct DefaultAuth {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
}

impl DefaultAuth {
    pub fn new(store: Arc<dyn CredentialStore>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn signin(&self, login: &str, password: &str) -> Result<SigninResponse, AppError> {
        if login.is_empty() || password.is_empty() {
            return Err(AppError::bad_arguments());
        }

        let Some(user) = self.store.find_by_login(login).await? else {
            warn!(login, "sign-in for unknown login");
            return Err(AppError::Unauthenticated(USER_NOT_FOUND.to_string()));
        };

        let matches =
            verify_password_blocking(password.to_string(), user.password_hash.clone()).await?;
        if !matches {
            warn!(user_id = %user.id, "sign-in with wrong password");
            return Err(AppError::Unauthenticated(WRONG_PASSWORD.to_string()));
        }

        let token = self.tokens.issue(&user.id, &user.login)?;
        info!(user_id = %user.id, "access granted");
        Ok(SigninResponse {
            token,
            user_id: user.id,
        })
    }

    async fn update_password(
        &self,
        user_id: &str,
        password: String,
    ) -> Result<UserIdResponse, AppError> {
        if user_id.is_empty() || password.is_empty() {
            return Err(AppError::bad_arguments());
        }

        let hash = hash_password_secure(password).await?;

        // the gate already authenticated this id, but the record may be gone
        let Some(mut user) = self.store.find_by_id(user_id).await? else {
            warn!(user_id, "password update for missing user");
            return Err(AppError::NotFound(format!("{USER_NOT_FOUND}.")));
        };
        user.password_hash = hash;
        let saved = self.store.save(user).await?;

        info!(user_id = %saved.id, "password updated");
        Ok(UserIdResponse { user_id: saved.id })
    }

    fn decode_token(&self, token: &str) -> Result<UserIdResponse, AppError> {
        if token.is_empty() {
            return Err(AppError::bad_arguments());
        }
        let claims = self.tokens.verify(token)?;
        Ok(UserIdResponse {
            user_id: claims.user_id,
        })
    }
}

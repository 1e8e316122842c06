// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-limited bearer tokens (JWT, HS256).
//!
//! A token carries `{ login, userId, iat, exp }` with `exp = iat + ttl`.
//! There is no revocation list: a token stays valid until it expires.
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::config::TokenSettings;
use crate::error::AppError;

/// Message for every token the service refuses to honour
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Identity claim embedded in a token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub login: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

/// Issues and verifies bearer tokens with a process-wide secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(settings: &TokenSettings) -> Result<Self, AppError> {
        if settings.secret.is_empty() {
            return Err(AppError::Internal("token secret is empty".to_string()));
        }
        let ttl = i64::try_from(settings.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                AppError::Internal(format!("token ttl out of range: {}", settings.ttl_secs))
            })?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Sign a fresh token for `user_id`/`login`
    pub fn issue(&self, user_id: &str, login: &str) -> Result<String, AppError> {
        self.issue_at(user_id, login, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`
    pub fn issue_at(
        &self,
        user_id: &str,
        login: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("token expiry out of range".to_string()))?;
        let claims = Claims {
            login: login.to_string(),
            user_id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
    }

    /// Check signature and expiry and return the embedded claim. A token is
    /// valid while `now < exp`.
    ///
    /// An empty token is a caller error (`BadRequest`). Forged, malformed or
    /// expired tokens are `Unauthenticated`; a failure of the key material
    /// or crypto backend itself is `Internal`.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        if token.is_empty() {
            return Err(AppError::bad_arguments());
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::Crypto(_)
                | ErrorKind::InvalidKeyFormat
                | ErrorKind::InvalidRsaKey(_)
                | ErrorKind::InvalidEcdsaKey
                | ErrorKind::RsaFailedSigning => {
                    AppError::Internal(format!("token verification failed: {e}"))
                },
                _ => {
                    tracing::debug!(error = %e, "token rejected");
                    AppError::Unauthenticated(NOT_AUTHENTICATED.to_string())
                },
            }
        })?;

        // jsonwebtoken still accepts a token in its `exp` second
        if data.claims.exp <= Utc::now().timestamp() || data.claims.user_id.is_empty() {
            return Err(AppError::Unauthenticated(NOT_AUTHENTICATED.to_string()));
        }
        Ok(data.claims)
    }
}

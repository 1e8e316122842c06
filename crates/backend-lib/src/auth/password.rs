// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are bcrypt (`$2b$12$...`), so records written by earlier
//! deployments of the service keep verifying.
use zeroize::Zeroize;

use crate::error::AppError;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 12;

/// Hash a password with a fresh salt
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, BCRYPT_COST)
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored hash. A malformed hash is a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or(false)
}

/// Hash on the blocking pool and zeroize the plaintext afterwards
pub async fn hash_password_secure(mut plain: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let hash = hash_password(&plain);
        plain.zeroize();
        hash
    })
    .await?
}

/// Verify on the blocking pool
pub async fn verify_password_blocking(plain: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || {
        let mut plain = plain;
        let ok = verify_password(&plain, &hash);
        plain.zeroize();
        ok
    })
    .await?;
    Ok(matches)
}

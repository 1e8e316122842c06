// crates/backend-lib/src/middleware/mod.rs

//! Middleware for the user-management service.

pub mod auth;

pub use auth::{bearer_token, require_auth, AuthContext};

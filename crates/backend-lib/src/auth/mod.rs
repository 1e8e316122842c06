// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod service;
mod service_impl;
pub mod token;

pub use password::{hash_password, hash_password_secure, verify_password, BCRYPT_COST};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{Claims, TokenService};

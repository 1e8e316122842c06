// ============================
// usermgmt-backend-lib/src/lib.rs
// ============================
//! Core of the user-management service: credential store, password hashing,
//! bearer tokens, the auth gate and the HTTP surface built on them.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod storage;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth, TokenService};
use crate::config::{Settings, StoreBackend};
use crate::error::AppError;
use crate::storage::{CredentialStore, FlatFileStore, MemoryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Credential store backend
    pub store: Arc<dyn CredentialStore>,
    /// Token signing/verification
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Create a new application state over an existing store
    pub fn new(store: Arc<dyn CredentialStore>, config: &Settings) -> Result<Self, AppError> {
        let tokens = Arc::new(TokenService::new(&config.token)?);
        let auth = Arc::new(DefaultAuth::new(store.clone(), tokens.clone()));

        Ok(Self {
            auth,
            store,
            tokens,
        })
    }

    /// Create a new application state, opening the store named by `config`
    /// and creating the bootstrap user if one is configured
    pub async fn from_settings(config: &Settings) -> Result<Self, AppError> {
        let store = open_store(config).await?;
        if let Some(user) = &config.bootstrap {
            accounts::ensure_bootstrap_user(store.as_ref(), user).await?;
        }
        Self::new(store, config)
    }
}

/// Open the configured credential store
pub async fn open_store(config: &Settings) -> Result<Arc<dyn CredentialStore>, AppError> {
    let store: Arc<dyn CredentialStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => Arc::new(FlatFileStore::open(&config.store.path).await?),
    };
    Ok(store)
}

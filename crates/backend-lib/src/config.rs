// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file,
//! then `USERMGMT_`-prefixed environment variables (`__` separates nested
//! keys, e.g. `USERMGMT_TOKEN__SECRET`).
use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "USERMGMT_";

/// Default config file looked up by [`Settings::load`]
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 60 * 60;

/// Longest token lifetime accepted: 30 days
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Credential store
    pub store: StoreSettings,
    /// Bearer token signing
    pub token: TokenSettings,
    /// User created at start-up when its login is not taken yet
    #[serde(default)]
    pub bootstrap: Option<BootstrapUser>,
}

/// Which credential store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// Data file for the `file` backend
    pub path: PathBuf,
}

/// Token signing settings. The secret has no default and must be supplied
/// by the deployment.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSettings {
    pub secret: String,
    pub ttl_secs: u64,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// First account of a fresh deployment, typically an administrator. Without
/// it a memory-backed service starts with no one able to sign in.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapUser {
    pub login: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_bootstrap_role")]
    pub role: String,
}

fn default_bootstrap_role() -> String {
    "admin".to_string()
}

impl fmt::Debug for BootstrapUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapUser")
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: "info".to_string(),
            store: StoreSettings::default(),
            token: TokenSettings::default(),
            bootstrap: None,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            path: PathBuf::from("data/users.json"),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(DEFAULT_CONFIG_FILE))
    }

    /// Load settings from an explicit file, still honouring the environment
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        Self::from_figment(Self::figment(path))
    }

    fn figment<P: AsRef<Path>>(path: P) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let settings: Settings = figment.extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.token.secret.trim().is_empty() {
            bail!("token.secret must be set (e.g. {ENV_PREFIX}TOKEN__SECRET)");
        }
        if self.token.ttl_secs == 0 || self.token.ttl_secs > MAX_TOKEN_TTL_SECS {
            bail!(
                "token.ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}, got {}",
                self.token.ttl_secs
            );
        }
        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            bail!("store.path must be set for the file backend");
        }
        if let Some(user) = &self.bootstrap {
            if user.login.is_empty() || user.email.is_empty() || user.password.is_empty() {
                bail!("bootstrap needs login, email and password");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_tests;

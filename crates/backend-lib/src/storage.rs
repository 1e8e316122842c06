// ============================
// crates/backend-lib/src/storage.rs
// ============================
//! Credential store abstraction with in-memory and flat-file implementations.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::{fs as tokio_fs, sync::Mutex, sync::RwLock};
use usermgmt_common::UserView;
use uuid::Uuid;

use crate::error::AppError;

/// A stored user. Only `id`, `login` and `password_hash` matter to
/// authentication; the rest backs the read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub login: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    pub creation_date: DateTime<Utc>,
    /// Opaque reference into the external role service
    pub role: String,
}

impl UserRecord {
    pub fn new(
        login: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            login: login.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            firstname: None,
            lastname: None,
            avatar: None,
            creation_date: Utc::now(),
            role: role.into(),
        }
    }

    /// Public projection, without the hash
    pub fn view(&self) -> UserView {
        UserView {
            user_id: self.id.clone(),
            login: self.login.clone(),
            email: self.email.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Trait for credential store backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look a user up by its unique login
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AppError>;

    /// Look a user up by id
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Look a user up by its unique email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    /// Insert or replace a record (keyed by id). Login and email stay unique.
    async fn save(&self, record: UserRecord) -> Result<UserRecord, AppError>;

    /// Remove a record, returning it if it existed
    async fn delete(&self, user_id: &str) -> Result<Option<UserRecord>, AppError>;

    /// Number of stored users
    async fn count(&self) -> Result<u64, AppError>;

    /// Users in creation order, skipping `skip` and returning at most `limit`
    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<UserRecord>, AppError>;
}

fn check_unique<'a>(
    mut others: impl Iterator<Item = &'a UserRecord>,
    record: &UserRecord,
) -> Result<(), AppError> {
    others.try_for_each(|other| {
        if other.id == record.id {
            Ok(())
        } else if other.login == record.login {
            Err(AppError::BadRequest("Login already exists.".to_string()))
        } else if other.email == record.email {
            Err(AppError::BadRequest("Email already exists.".to_string()))
        } else {
            Ok(())
        }
    })
}

fn page(mut users: Vec<UserRecord>, skip: u64, limit: u64) -> Vec<UserRecord> {
    users.sort_by(|a, b| {
        a.creation_date
            .cmp(&b.creation_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    users
        .into_iter()
        .skip(usize::try_from(skip).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, UserRecord>,
    // serializes the uniqueness check with the insert
    write_lock: Mutex<()>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.login == login)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(user_id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let _guard = self.write_lock.lock().await;
        {
            let snapshot: Vec<UserRecord> =
                self.users.iter().map(|entry| entry.value().clone()).collect();
            check_unique(snapshot.iter(), &record)?;
        }
        self.users.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn delete(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        let _guard = self.write_lock.lock().await;
        Ok(self.users.remove(user_id).map(|(_, record)| record))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.users.len() as u64)
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<UserRecord>, AppError> {
        let users = self.users.iter().map(|entry| entry.value().clone()).collect();
        Ok(page(users, skip, limit))
    }
}

/// Flat-file store: every user lives in one JSON array rewritten on save
#[derive(Debug)]
pub struct FlatFileStore {
    path: PathBuf,
    users: RwLock<Vec<UserRecord>>,
}

impl FlatFileStore {
    /// Open (or create on first save) the data file at `path`
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio_fs::create_dir_all(parent).await?;
        }

        let users: Vec<UserRecord> = if tokio_fs::try_exists(&path).await? {
            let content = tokio_fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), users = users.len(), "opened user store");

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    async fn persist(&self, users: &[UserRecord]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(users)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FlatFileStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.login == login).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, AppError> {
        let mut users = self.users.write().await;
        check_unique(users.iter(), &record)?;

        let mut updated = users.clone();
        match updated.iter_mut().find(|u| u.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => updated.push(record.clone()),
        }
        // memory only changes once the file write went through
        self.persist(&updated).await?;
        *users = updated;
        Ok(record)
    }

    async fn delete(&self, user_id: &str) -> Result<Option<UserRecord>, AppError> {
        let mut users = self.users.write().await;
        let Some(index) = users.iter().position(|u| u.id == user_id) else {
            return Ok(None);
        };

        let mut updated = users.clone();
        let removed = updated.remove(index);
        self.persist(&updated).await?;
        *users = updated;
        Ok(Some(removed))
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn list(&self, skip: u64, limit: u64) -> Result<Vec<UserRecord>, AppError> {
        let users = self.users.read().await.clone();
        Ok(page(users, skip, limit))
    }
}

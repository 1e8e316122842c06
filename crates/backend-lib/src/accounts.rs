// ============================
// crates/backend-lib/src/accounts.rs
// ============================
//! User account management on top of a [`CredentialStore`]: creation,
//! profile updates, deletion and the start-up bootstrap account.
use tracing::info;
use usermgmt_common::{CreateUserRequest, UpdateUserRequest, UserIdResponse};

use crate::auth::hash_password_secure;
use crate::config::BootstrapUser;
use crate::error::AppError;
use crate::storage::{CredentialStore, UserRecord};

pub const USER_NOT_FOUND: &str = "User not found.";

fn not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

/// Hash the password and store a new record. Login and email uniqueness is
/// enforced by the store.
pub async fn create_user(
    store: &dyn CredentialStore,
    request: CreateUserRequest,
) -> Result<UserRecord, AppError> {
    if request.login.is_empty()
        || request.password.is_empty()
        || request.email.is_empty()
        || request.role.is_empty()
    {
        return Err(AppError::bad_arguments());
    }

    let CreateUserRequest {
        login,
        password,
        email,
        role,
        firstname,
        lastname,
        avatar,
    } = request;

    let hash = hash_password_secure(password).await?;
    let mut record = UserRecord::new(login, email, hash, role);
    record.firstname = firstname;
    record.lastname = lastname;
    record.avatar = avatar;

    let saved = store.save(record).await?;
    info!(user_id = %saved.id, login = %saved.login, "user created");
    Ok(saved)
}

/// Apply the fields present in `update`; absent ones keep their value
pub async fn update_user(
    store: &dyn CredentialStore,
    user_id: &str,
    update: UpdateUserRequest,
) -> Result<UserRecord, AppError> {
    if user_id.is_empty() || update.role.as_deref() == Some("") {
        return Err(AppError::bad_arguments());
    }

    let mut user = store.find_by_id(user_id).await?.ok_or_else(not_found)?;
    if let Some(firstname) = update.firstname {
        user.firstname = Some(firstname);
    }
    if let Some(lastname) = update.lastname {
        user.lastname = Some(lastname);
    }
    if let Some(avatar) = update.avatar {
        user.avatar = Some(avatar);
    }
    if let Some(role) = update.role {
        user.role = role;
    }

    let saved = store.save(user).await?;
    info!(user_id = %saved.id, "user updated");
    Ok(saved)
}

pub async fn delete_user(
    store: &dyn CredentialStore,
    user_id: &str,
) -> Result<UserIdResponse, AppError> {
    if user_id.is_empty() {
        return Err(AppError::bad_arguments());
    }

    let removed = store.delete(user_id).await?.ok_or_else(not_found)?;
    info!(user_id = %removed.id, "user deleted");
    Ok(UserIdResponse {
        user_id: removed.id,
    })
}

/// Create the bootstrap account unless its login already exists. An existing
/// account is left as is, password included.
pub async fn ensure_bootstrap_user(
    store: &dyn CredentialStore,
    user: &BootstrapUser,
) -> Result<Option<UserRecord>, AppError> {
    if store.find_by_login(&user.login).await?.is_some() {
        tracing::debug!(login = %user.login, "bootstrap user already present");
        return Ok(None);
    }

    let created = create_user(
        store,
        CreateUserRequest {
            login: user.login.clone(),
            password: user.password.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            ..Default::default()
        },
    )
    .await?;
    Ok(Some(created))
}

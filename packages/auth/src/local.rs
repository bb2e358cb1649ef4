//! Local username/password strategy.
//!
//! Both entry points only resolve a [`User`]; establishing the session is the caller's
//! job (see [`crate::session::login`]).

use store::{User, UserStore};

use crate::error::{AuthError, Result};
use crate::password::{hash_password, verify_password};

/// Create a local account. Fails with [`AuthError::MissingCredentials`] on blank input
/// and [`AuthError::DuplicateUser`] when the username is already taken; in both cases
/// nothing is written.
pub async fn register<S: UserStore>(store: &S, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let password_hash = hash_password(password)?;
    match store.insert_local(username, &password_hash).await? {
        Some(user) => {
            tracing::info!(user_id = %user.id, "registered local user");
            Ok(user)
        }
        None => Err(AuthError::DuplicateUser),
    }
}

/// Check a username/password pair against the stored hash.
pub async fn authenticate<S: UserStore>(
    store: &S,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }

    let Some(user) = store.find_by_username(username).await? else {
        return Err(AuthError::InvalidCredentials);
    };

    // Federated accounts have no password to check against.
    let Some(ref hash) = user.password_hash else {
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

//! # User store abstraction
//!
//! [`UserStore`] is the async interface every handler and strategy talks to. The
//! in-memory implementation lives in [`crate::memory`]; the PostgreSQL one lives in the
//! `auth` crate next to its migrations.
//!
//! Two operations carry an atomicity contract:
//!
//! | Method | Contract |
//! |--------|----------|
//! | [`insert_local`](UserStore::insert_local) | Inserts a local account unless the username is taken, as one step. Returns `None` on conflict. |
//! | [`find_or_create`](UserStore::find_or_create) | Get-or-insert keyed on an [`ExternalId`]. Concurrent callers with the same never-seen id all receive the same single record. |

use std::future::Future;

use uuid::Uuid;

use crate::models::{ExternalId, User};

/// Errors raised by a user store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Async persistence for [`User`] records.
pub trait UserStore: Clone + Send + Sync + 'static {
    fn find_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
    fn insert_local(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<Option<User>, StoreError>> + Send;
    fn find_or_create(
        &self,
        external_id: &ExternalId,
    ) -> impl Future<Output = Result<User, StoreError>> + Send;
    /// Returns `false` when no user has the given id.
    fn set_secret(
        &self,
        id: Uuid,
        secret: &str,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
    /// Every user whose `secret` is set, oldest first.
    fn list_with_secret(&self) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;
}

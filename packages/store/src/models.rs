//! # User records
//!
//! A [`User`] is one row of the user collection. Every identity field is optional:
//! local accounts populate `username` + `password_hash`, federated accounts populate
//! exactly one of `google_id` / `facebook_id`. Nothing forbids a record carrying more
//! than one identity, but the sign-in flows only ever set one at creation.
//!
//! [`ExternalId`] names the federated identity a record is keyed on and is what the
//! find-or-create path of [`crate::UserStore`] takes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    /// Argon2 PHC string, present only for local accounts.
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub facebook_id: Option<String>,
    pub secret: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Blank record with a fresh id; callers fill in the identity fields.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: None,
            password_hash: None,
            google_id: None,
            facebook_id: None,
            secret: None,
            username: None,
            name: None,
            created_at: Utc::now(),
        }
    }

    /// A local account with an already-hashed password.
    pub fn local(username: &str, password_hash: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password_hash: Some(password_hash.to_string()),
            ..Self::new()
        }
    }

    /// A federated account carrying only its external identifier.
    pub fn external(external_id: &ExternalId) -> Self {
        let mut user = Self::new();
        match external_id {
            ExternalId::Google(id) => user.google_id = Some(id.clone()),
            ExternalId::Facebook(id) => user.facebook_id = Some(id.clone()),
        }
        user
    }

    /// Whether this record is keyed on the given external identifier.
    pub fn matches(&self, external_id: &ExternalId) -> bool {
        match external_id {
            ExternalId::Google(id) => self.google_id.as_deref() == Some(id),
            ExternalId::Facebook(id) => self.facebook_id.as_deref() == Some(id),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier issued by a federated provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExternalId {
    Google(String),
    Facebook(String),
}

impl ExternalId {
    /// The raw provider-side id.
    pub fn value(&self) -> &str {
        match self {
            ExternalId::Google(id) | ExternalId::Facebook(id) => id,
        }
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Google(id) => write!(f, "google:{id}"),
            ExternalId::Facebook(id) => write!(f, "facebook:{id}"),
        }
    }
}

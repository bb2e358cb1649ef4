use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::models::{ExternalId, User};
use crate::repo::{StoreError, UserStore};

/// In-memory UserStore for testing and local runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing the uniqueness checks.
    pub fn seed(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every stored record in insertion order.
    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn insert_local(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username.as_deref() == Some(username)) {
            return Ok(None);
        }
        let user = User::local(username, password_hash);
        users.push(user.clone());
        Ok(Some(user))
    }

    async fn find_or_create(&self, external_id: &ExternalId) -> Result<User, StoreError> {
        // Lookup and insert happen under the same guard.
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter().find(|u| u.matches(external_id)) {
            return Ok(user.clone());
        }
        let user = User::external(external_id);
        users.push(user.clone());
        Ok(user)
    }

    async fn set_secret(&self, id: Uuid, secret: &str) -> Result<bool, StoreError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.secret = Some(secret.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_with_secret(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.secret.is_some())
            .cloned()
            .collect())
    }
}

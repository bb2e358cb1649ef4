//! PostgreSQL-backed [`UserStore`].
//!
//! Uniqueness of `username`, `google_id` and `facebook_id` is enforced by the table's
//! unique constraints, so registration and find-or-create are single statements:
//!
//! - local registration is `INSERT ... ON CONFLICT (username) DO NOTHING`, and an empty
//!   `RETURNING` means the name was taken;
//! - find-or-create is `INSERT ... ON CONFLICT (<provider>_id) DO UPDATE` with a no-op
//!   update, which makes `RETURNING` yield the existing row on conflict. Two racing
//!   first-time callbacks serialize on the unique index and both get the same row.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use store::{ExternalId, StoreError, User, UserStore};
use uuid::Uuid;

/// Database backed user.
#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: Option<String>,
    password_hash: Option<String>,
    google_id: Option<String>,
    facebook_id: Option<String>,
    secret: Option<String>,
    username: Option<String>,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            google_id: row.google_id,
            facebook_id: row.facebook_id,
            secret: row.secret,
            username: row.username,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.map(User::from))
    }

    async fn insert_local(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;
        Ok(row.map(User::from))
    }

    async fn find_or_create(&self, external_id: &ExternalId) -> Result<User, StoreError> {
        let query = match external_id {
            ExternalId::Google(_) => {
                r#"
                INSERT INTO users (id, google_id)
                VALUES ($1, $2)
                ON CONFLICT (google_id) DO UPDATE SET google_id = EXCLUDED.google_id
                RETURNING *
                "#
            }
            ExternalId::Facebook(_) => {
                r#"
                INSERT INTO users (id, facebook_id)
                VALUES ($1, $2)
                ON CONFLICT (facebook_id) DO UPDATE SET facebook_id = EXCLUDED.facebook_id
                RETURNING *
                "#
            }
        };

        let row: UserRow = sqlx::query_as(query)
            .bind(Uuid::new_v4())
            .bind(external_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        Ok(row.into())
    }

    async fn set_secret(&self, id: Uuid, secret: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE users SET secret = $2 WHERE id = $1")
            .bind(id)
            .bind(secret)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_with_secret(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT * FROM users WHERE secret IS NOT NULL ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_local_rejects_taken_username(pool: PgPool) {
        let store = PgStore::new(pool);

        let first = store.insert_local("alice", "hash-1").await.unwrap().unwrap();
        assert!(store.insert_local("alice", "hash-2").await.unwrap().is_none());

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.password_hash.as_deref(), Some("hash-1"));
        assert_eq!(store.find_by_id(first.id).await.unwrap(), Some(found));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_find_or_create_returns_same_row(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let id = ExternalId::Google("g-1".into());

        let created = store.find_or_create(&id).await.unwrap();
        let found = store.find_or_create(&id).await.unwrap();

        assert_eq!(created.id, found.id);
        assert_eq!(found.google_id.as_deref(), Some("g-1"));
        assert!(found.facebook_id.is_none());

        // Same raw id under another provider is a different user.
        let other = store
            .find_or_create(&ExternalId::Facebook("g-1".into()))
            .await
            .unwrap();
        assert_ne!(other.id, created.id);
        assert_eq!(count(&pool).await, 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_concurrent_find_or_create_yields_one_row(pool: PgPool) {
        let store = PgStore::new(pool.clone());
        let id = ExternalId::Facebook("never-seen".into());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move { store.find_or_create(&id).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert!(ids.iter().all(|i| *i == ids[0]));
        assert_eq!(count(&pool).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_set_secret_and_list(pool: PgPool) {
        let store = PgStore::new(pool);
        let a = store.insert_local("a", "h").await.unwrap().unwrap();
        let _b = store.insert_local("b", "h").await.unwrap().unwrap();
        let c = store
            .find_or_create(&ExternalId::Google("c".into()))
            .await
            .unwrap();

        assert!(store.set_secret(a.id, "x").await.unwrap());
        assert!(store.set_secret(c.id, "y").await.unwrap());
        assert!(!store.set_secret(Uuid::new_v4(), "z").await.unwrap());

        let listed: Vec<_> = store
            .list_with_secret()
            .await
            .unwrap()
            .into_iter()
            .map(|u| (u.id, u.secret.unwrap()))
            .collect();
        assert_eq!(listed, vec![(a.id, "x".to_string()), (c.id, "y".to_string())]);
    }

    async fn count(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }
}

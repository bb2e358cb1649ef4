//! # Database module — PostgreSQL pool, migrations and the `users` store
//!
//! - [`connect`] opens the shared pool from [`crate::settings::Database`].
//! - [`migrate`] applies the embedded migrations under `packages/auth/migrations`.
//! - [`PgStore`] is the production [`store::UserStore`].

mod pool;
mod postgres;

pub use pool::{connect, migrate};
pub use postgres::PgStore;

//! # auth — sign-in strategies and sessions for the secrets site
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`local`] | Username/password registration and login against the user store |
//! | [`oauth`] | Google and Facebook authorization-code strategies, find-or-create on callback |
//! | [`session`] | Session manager: serialize the user id, reload the user per request, logout |
//! | [`password`] | Argon2id hashing and verification |
//! | [`db`] | PostgreSQL pool, migrations and the [`db::PgStore`] user store |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |

pub mod db;
pub mod error;
pub mod local;
pub mod oauth;
pub mod password;
pub mod session;
pub mod settings;

pub use error::{AuthError, Result};
pub use oauth::{Callback, OAuthStrategy, Provider, Strategies};
pub use settings::Settings;

//! Route table and the handlers behind it.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/` | [`pages::home`] |
//! | GET, POST | `/register` | [`pages::register`], [`local::register`] |
//! | GET, POST | `/login` | [`pages::login`], [`local::login`] |
//! | GET | `/logout` | [`local::logout`] |
//! | GET | `/secrets` | [`secrets::list`] |
//! | GET, POST | `/submit` | [`pages::submit`], [`secrets::submit`] |
//! | GET | `/auth/{provider}` | [`federated::authorize`] |
//! | GET | `/auth/{provider}/secrets` | [`federated::callback`] |

pub mod federated;
pub mod local;
pub mod pages;
pub mod secrets;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use store::{User, UserStore};
use tower_sessions::Session;

use auth::{session, AuthError};

use crate::AppState;

pub fn router<S: UserStore>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/register", get(pages::register).post(local::register::<S>))
        .route("/login", get(pages::login).post(local::login::<S>))
        .route("/logout", get(local::logout))
        .route("/secrets", get(secrets::list::<S>))
        .route("/submit", get(pages::submit).post(secrets::submit::<S>))
        .route("/auth/{provider}", get(federated::authorize::<S>))
        .route("/auth/{provider}/secrets", get(federated::callback::<S>))
        .with_state(state)
}

/// Put `user` into the session and continue to the secrets page.
pub(crate) async fn sign_in(session: &Session, user: &User, failure: &str) -> Redirect {
    match session::login(session, user).await {
        Ok(()) => {
            tracing::info!(user_id = %user.id, "signed in");
            Redirect::to("/secrets")
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to establish session");
            Redirect::to(failure)
        }
    }
}

pub(crate) fn log_auth_error(action: &str, error: &AuthError) {
    if error.is_rejection() {
        tracing::warn!(error = %error, "{action} rejected");
    } else {
        tracing::error!(error = %error, "{action} failed");
    }
}

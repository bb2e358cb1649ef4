//! Username/password forms and logout.

use axum::extract::{Form, State};
use axum::response::Redirect;
use serde::Deserialize;
use store::UserStore;
use tower_sessions::Session;

use auth::{local, session};

use super::{log_auth_error, sign_in};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Redirect {
    match local::register(&state.store, &form.username, &form.password).await {
        Ok(user) => sign_in(&session, &user, "/register").await,
        Err(e) => {
            log_auth_error("registration", &e);
            Redirect::to("/register")
        }
    }
}

pub async fn login<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<Credentials>,
) -> Redirect {
    match local::authenticate(&state.store, &form.username, &form.password).await {
        Ok(user) => sign_in(&session, &user, "/login").await,
        Err(e) => {
            log_auth_error("login", &e);
            Redirect::to("/login")
        }
    }
}

pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session::logout(&session).await {
        tracing::error!(error = %e, "failed to end session");
    }
    Redirect::to("/")
}

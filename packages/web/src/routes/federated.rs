//! Google / Facebook handshake routes.
//!
//! Every failure, from an unknown provider name to a rejected token exchange, sends
//! the visitor back to `/login`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::Redirect;
use store::{User, UserStore};
use tower_sessions::Session;

use auth::{session, AuthError, Callback, Provider};

use super::{log_auth_error, sign_in};
use crate::AppState;

pub async fn authorize<S: UserStore>(
    State(state): State<AppState<S>>,
    Path(provider): Path<String>,
    session: Session,
) -> Redirect {
    match begin(&state, &provider, &session).await {
        Ok(url) => Redirect::to(&url),
        Err(e) => {
            log_auth_error("federated sign-in", &e);
            Redirect::to("/login")
        }
    }
}

pub async fn callback<S: UserStore>(
    State(state): State<AppState<S>>,
    Path(provider): Path<String>,
    callback: Result<Query<Callback>, QueryRejection>,
    session: Session,
) -> Redirect {
    let callback = match callback {
        Ok(Query(callback)) => callback,
        Err(e) => {
            let error = AuthError::Provider(format!("malformed callback: {e}"));
            log_auth_error("federated callback", &error);
            return Redirect::to("/login");
        }
    };

    match finish(&state, &provider, &callback, &session).await {
        Ok(user) => sign_in(&session, &user, "/login").await,
        Err(e) => {
            log_auth_error("federated callback", &e);
            Redirect::to("/login")
        }
    }
}

async fn begin<S: UserStore>(
    state: &AppState<S>,
    provider: &str,
    session: &Session,
) -> auth::Result<String> {
    let provider: Provider = provider.parse()?;
    let authorization = state.strategies.get(provider)?.authorize();
    session::store_pending(session, &authorization.pending).await?;
    Ok(authorization.url)
}

async fn finish<S: UserStore>(
    state: &AppState<S>,
    provider: &str,
    callback: &Callback,
    session: &Session,
) -> auth::Result<User> {
    let provider: Provider = provider.parse()?;
    let strategy = state.strategies.get(provider)?;
    let pending = session::take_pending(session)
        .await?
        .ok_or_else(|| AuthError::Provider("no handshake in progress".into()))?;

    strategy
        .complete(&state.store, state.strategies.http(), callback, pending)
        .await
}

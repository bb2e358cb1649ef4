//! # web — HTTP surface of the secrets site
//!
//! [`app`] assembles the full router: page and auth routes from [`routes`], the signed
//! session cookie layer and request tracing. `main.rs` feeds it the PostgreSQL stores;
//! the integration tests feed it in-memory ones.

pub mod error;
pub mod routes;
pub mod views;

use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use auth::settings;
use auth::Strategies;
use store::UserStore;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub strategies: Arc<Strategies>,
}

impl<S: UserStore> AppState<S> {
    pub fn new(store: S, strategies: Strategies) -> Self {
        Self {
            store,
            strategies: Arc::new(strategies),
        }
    }
}

/// Build the application router with sessions kept in `session_store`.
pub fn app<S, Ss>(
    state: AppState<S>,
    session_store: Ss,
    session: &settings::Session,
) -> anyhow::Result<Router>
where
    S: UserStore,
    Ss: SessionStore + Clone,
{
    let key = Key::try_from(session.secret.as_bytes())
        .map_err(|e| anyhow!("invalid session secret: {e:?}"))?;

    // Lax so the provider's redirect back to us still carries the cookie.
    let sessions = SessionManagerLayer::new(session_store)
        .with_secure(session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            session.inactivity_days,
        )))
        .with_signed(key);

    Ok(routes::router(state).layer(sessions).layer(
        TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()),
    ))
}

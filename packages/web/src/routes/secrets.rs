use axum::extract::{Form, State};
use axum::response::{Html, Redirect};
use serde::Deserialize;
use store::UserStore;
use tower_sessions::Session;

use auth::session;

use crate::error::WebError;
use crate::{views, AppState};

/// Every submitted secret. Open to any visitor, signed in or not.
pub async fn list<S: UserStore>(State(state): State<AppState<S>>) -> Result<Html<String>, WebError> {
    let secrets = state
        .store
        .list_with_secret()
        .await?
        .into_iter()
        .filter_map(|user| user.secret)
        .collect();

    Ok(views::secrets(secrets))
}

#[derive(Debug, Deserialize)]
pub struct SecretForm {
    #[serde(default)]
    pub secret: String,
}

pub async fn submit<S: UserStore>(
    State(state): State<AppState<S>>,
    session: Session,
    Form(form): Form<SecretForm>,
) -> Result<Redirect, WebError> {
    let Some(user) = session::current_user(&session, &state.store).await? else {
        return Ok(Redirect::to("/login"));
    };

    let secret = form.secret.trim();
    if secret.is_empty() {
        return Ok(Redirect::to("/submit"));
    }

    if !state.store.set_secret(user.id, secret).await? {
        tracing::warn!(user_id = %user.id, "user vanished before the secret was saved");
        return Ok(Redirect::to("/login"));
    }

    tracing::info!(user_id = %user.id, "secret submitted");
    Ok(Redirect::to("/secrets"))
}

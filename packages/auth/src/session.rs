//! # Session manager
//!
//! The session holds only the signed-in user's id under [`SESSION_USER_ID_KEY`]; every
//! request re-reads the full record from the store through [`current_user`], so the
//! session never carries a stale copy of the user.
//!
//! A session is Unauthenticated until [`login`] runs (after a local or federated
//! strategy succeeded) and returns to Unauthenticated only through [`logout`].

use store::{User, UserStore};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::Result;
use crate::oauth::PendingAuthorization;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Key for the in-flight federated handshake.
pub const PENDING_AUTHORIZATION_KEY: &str = "oauth_pending";

/// Mark the session as belonging to `user`. The session id is rotated first.
pub async fn login(session: &Session, user: &User) -> Result<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user.id).await?;
    tracing::debug!(user_id = %user.id, "session authenticated");
    Ok(())
}

/// The id stored in the session, if any, without touching the store.
pub async fn user_id(session: &Session) -> Result<Option<Uuid>> {
    Ok(session.get::<Uuid>(SESSION_USER_ID_KEY).await?)
}

/// Load the signed-in user. A session whose user has disappeared is downgraded to
/// Unauthenticated.
pub async fn current_user<S: UserStore>(session: &Session, store: &S) -> Result<Option<User>> {
    let Some(id) = user_id(session).await? else {
        return Ok(None);
    };

    match store.find_by_id(id).await? {
        Some(user) => Ok(Some(user)),
        None => {
            tracing::warn!(user_id = %id, "session refers to a missing user");
            session.remove::<Uuid>(SESSION_USER_ID_KEY).await?;
            Ok(None)
        }
    }
}

/// Drop the whole session, including its record in the session store.
pub async fn logout(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}

pub async fn store_pending(session: &Session, pending: &PendingAuthorization) -> Result<()> {
    session.insert(PENDING_AUTHORIZATION_KEY, pending).await?;
    Ok(())
}

/// Take the pending handshake out of the session; it is single use.
pub async fn take_pending(session: &Session) -> Result<Option<PendingAuthorization>> {
    Ok(session
        .remove::<PendingAuthorization>(PENDING_AUTHORIZATION_KEY)
        .await?)
}

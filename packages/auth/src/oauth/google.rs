//! Google endpoints and the userinfo lookup.
//!
//! The stable identifier is the OpenID `sub` claim returned by the v3 userinfo
//! endpoint. Only the `profile` scope is requested.

use serde::Deserialize;

use crate::error::{AuthError, Result};

pub(crate) const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub(crate) const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub(crate) const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

pub(crate) const SCOPES: &[&str] = &["profile"];

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    sub: String,
}

pub(crate) async fn fetch_user_id(
    http: &reqwest::Client,
    userinfo_url: &str,
    access_token: &str,
) -> Result<String> {
    let user: GoogleUser = http
        .get(userinfo_url)
        .bearer_auth(access_token)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuthError::Provider(format!("google userinfo request failed: {e}")))?
        .json()
        .await
        .map_err(|e| AuthError::Provider(format!("google userinfo malformed: {e}")))?;

    Ok(user.sub)
}

//! Facebook endpoints and the Graph API profile lookup.

use serde::Deserialize;

use crate::error::{AuthError, Result};

pub(crate) const AUTH_URL: &str = "https://www.facebook.com/v3.2/dialog/oauth";
pub(crate) const TOKEN_URL: &str = "https://graph.facebook.com/v3.2/oauth/access_token";
pub(crate) const USERINFO_URL: &str = "https://graph.facebook.com/v3.2/me";

pub(crate) const SCOPES: &[&str] = &[];

#[derive(Debug, Deserialize)]
struct FacebookUser {
    id: String,
}

pub(crate) async fn fetch_user_id(
    http: &reqwest::Client,
    profile_url: &str,
    access_token: &str,
) -> Result<String> {
    let user: FacebookUser = http
        .get(profile_url)
        .query(&[("fields", "id")])
        .bearer_auth(access_token)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AuthError::Provider(format!("facebook profile request failed: {e}")))?
        .json()
        .await
        .map_err(|e| AuthError::Provider(format!("facebook profile malformed: {e}")))?;

    Ok(user.id)
}

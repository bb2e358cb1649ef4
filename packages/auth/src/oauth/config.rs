//! OAuth client configuration built from [`Settings`].

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use super::{facebook, google, Provider};
use crate::error::{AuthError, Result};
use crate::settings::{self, Settings};

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    /// Profile endpoint queried with the access token for the provider-side user id.
    pub userinfo_url: String,
    pub redirect_url: RedirectUrl,
}

impl OAuthConfig {
    /// Configuration for `provider`, or `None` when its credentials are not set.
    pub fn from_settings(settings: &Settings, provider: Provider) -> Result<Option<Self>> {
        let credentials = match provider {
            Provider::Google => settings.google.as_ref(),
            Provider::Facebook => settings.facebook.as_ref(),
        };
        let Some(credentials) = credentials else {
            return Ok(None);
        };
        let redirect = settings.redirect_url(credentials, provider.as_str());
        Self::new(provider, credentials, &redirect).map(Some)
    }

    pub fn new(provider: Provider, credentials: &settings::Provider, redirect: &str) -> Result<Self> {
        let (auth_url, token_url, userinfo_url) = match provider {
            Provider::Google => (google::AUTH_URL, google::TOKEN_URL, google::USERINFO_URL),
            Provider::Facebook => (facebook::AUTH_URL, facebook::TOKEN_URL, facebook::USERINFO_URL),
        };
        Self::with_endpoints(credentials, auth_url, token_url, userinfo_url, redirect)
    }

    /// Configuration against explicit endpoints instead of the provider's public ones.
    pub fn with_endpoints(
        credentials: &settings::Provider,
        auth_url: &str,
        token_url: &str,
        userinfo_url: &str,
        redirect: &str,
    ) -> Result<Self> {
        Ok(Self {
            client_id: ClientId::new(credentials.client_id.clone()),
            client_secret: ClientSecret::new(credentials.client_secret.clone()),
            auth_url: AuthUrl::new(auth_url.to_string())
                .map_err(|e| AuthError::Config(e.to_string()))?,
            token_url: TokenUrl::new(token_url.to_string())
                .map_err(|e| AuthError::Config(e.to_string()))?,
            userinfo_url: userinfo_url.to_string(),
            redirect_url: RedirectUrl::new(redirect.to_string())
                .map_err(|e| AuthError::Config(format!("invalid redirect url {redirect}: {e}")))?,
        })
    }
}

//! # Federated sign-in (Google, Facebook)
//!
//! Each configured provider gets an [`OAuthStrategy`]: an authorization-code client
//! with fixed endpoints and scopes. The handshake has two halves:
//!
//! 1. [`authorize`](OAuthStrategy::authorize) builds the provider URL with a random CSRF
//!    state (and a PKCE challenge where the provider supports it). The returned
//!    [`PendingAuthorization`] is parked in the visitor's session until the callback.
//! 2. [`complete`](OAuthStrategy::complete) checks the callback against the pending
//!    state, exchanges the code, reads the provider's stable user id and runs the
//!    store's atomic find-or-create on it.
//!
//! [`Strategies`] is the immutable set of configured providers, assembled once at
//! startup and shared with the route handlers.

mod config;
mod facebook;
mod google;

use std::fmt;
use std::str::FromStr;

use oauth2::basic::BasicClient;
use oauth2::{
    AuthType, AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, Scope, TokenResponse,
};
use serde::{Deserialize, Serialize};
use store::{ExternalId, User, UserStore};

pub use config::OAuthConfig;

use crate::error::{AuthError, Result};
use crate::settings::Settings;

/// A federated identity provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }

    fn scopes(&self) -> &'static [&'static str] {
        match self {
            Provider::Google => google::SCOPES,
            Provider::Facebook => facebook::SCOPES,
        }
    }

    fn uses_pkce(&self) -> bool {
        matches!(self, Provider::Google)
    }

    /// Facebook expects the client secret in the token request body.
    fn auth_type(&self) -> AuthType {
        match self {
            Provider::Google => AuthType::BasicAuth,
            Provider::Facebook => AuthType::RequestBody,
        }
    }

    pub fn external_id(&self, id: String) -> ExternalId {
        match self {
            Provider::Google => ExternalId::Google(id),
            Provider::Facebook => ExternalId::Facebook(id),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(Provider::Google),
            "facebook" => Ok(Provider::Facebook),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }
}

/// Handshake state kept in the session between redirect and callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingAuthorization {
    pub provider: Provider,
    pub state: String,
    pub pkce_verifier: Option<String>,
}

/// Where to send the visitor, and what to remember until they come back.
#[derive(Debug)]
pub struct Authorization {
    pub url: String,
    pub pending: PendingAuthorization,
}

/// Query parameters of the provider's redirect back to us.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Callback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Authorization-code strategy for one provider.
#[derive(Debug, Clone)]
pub struct OAuthStrategy {
    provider: Provider,
    config: OAuthConfig,
}

impl OAuthStrategy {
    pub fn new(provider: Provider, config: OAuthConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
            .set_auth_type(self.provider.auth_type())
    }

    /// Build the provider's authorization URL.
    pub fn authorize(&self) -> Authorization {
        let client = self.create_client();
        let mut request = client.authorize_url(CsrfToken::new_random);
        for scope in self.provider.scopes() {
            request = request.add_scope(Scope::new(scope.to_string()));
        }

        let mut pkce_verifier = None;
        if self.provider.uses_pkce() {
            let (challenge, verifier) = PkceCodeChallenge::new_random_sha256();
            request = request.set_pkce_challenge(challenge);
            pkce_verifier = Some(verifier.secret().clone());
        }

        let (url, csrf_state) = request.url();
        Authorization {
            url: url.to_string(),
            pending: PendingAuthorization {
                provider: self.provider,
                state: csrf_state.secret().clone(),
                pkce_verifier,
            },
        }
    }

    /// Check the callback against the pending handshake and return the state-verified
    /// authorization code.
    fn verify_callback<'a>(
        &self,
        callback: &'a Callback,
        pending: &PendingAuthorization,
    ) -> Result<&'a str> {
        if let Some(error) = &callback.error {
            return Err(AuthError::Provider(format!(
                "{} returned an error: {error}",
                self.provider
            )));
        }
        if pending.provider != self.provider {
            return Err(AuthError::Provider(format!(
                "pending handshake is for {}, callback is for {}",
                pending.provider, self.provider
            )));
        }
        let state = callback
            .state
            .as_deref()
            .ok_or_else(|| AuthError::Provider("callback is missing state".into()))?;
        if state != pending.state {
            return Err(AuthError::Provider("callback state mismatch".into()));
        }
        callback
            .code
            .as_deref()
            .ok_or_else(|| AuthError::Provider("callback is missing code".into()))
    }

    /// Exchange the callback's code and resolve the provider-side user id.
    pub async fn exchange(
        &self,
        http: &reqwest::Client,
        callback: &Callback,
        pending: PendingAuthorization,
    ) -> Result<ExternalId> {
        let code = self.verify_callback(callback, &pending)?;

        let client = self.create_client();
        let mut request = client.exchange_code(AuthorizationCode::new(code.to_string()));
        if let Some(verifier) = pending.pkce_verifier {
            request = request.set_pkce_verifier(PkceCodeVerifier::new(verifier));
        }

        let token = request
            .request_async(http)
            .await
            .map_err(|e| AuthError::Provider(format!("token exchange failed: {e}")))?;
        let access_token = token.access_token().secret();

        let userinfo_url = &self.config.userinfo_url;
        let id = match self.provider {
            Provider::Google => google::fetch_user_id(http, userinfo_url, access_token).await?,
            Provider::Facebook => {
                facebook::fetch_user_id(http, userinfo_url, access_token).await?
            }
        };
        Ok(self.provider.external_id(id))
    }

    /// Full callback handling: exchange, then find-or-create the local user.
    pub async fn complete<S: UserStore>(
        &self,
        store: &S,
        http: &reqwest::Client,
        callback: &Callback,
        pending: PendingAuthorization,
    ) -> Result<User> {
        let external_id = self.exchange(http, callback, pending).await?;
        let user = store.find_or_create(&external_id).await?;
        tracing::info!(user_id = %user.id, %external_id, "federated sign-in");
        Ok(user)
    }
}

/// The configured sign-in providers plus the HTTP client they share.
#[derive(Debug, Clone)]
pub struct Strategies {
    google: Option<OAuthStrategy>,
    facebook: Option<OAuthStrategy>,
    http: reqwest::Client,
}

impl Strategies {
    pub fn new(google: Option<OAuthStrategy>, facebook: Option<OAuthStrategy>) -> Result<Self> {
        // Token endpoints must not be followed through redirects.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::Config(e.to_string()))?;

        Ok(Self {
            google,
            facebook,
            http,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let build = |provider| {
            Ok::<_, AuthError>(
                OAuthConfig::from_settings(settings, provider)?
                    .map(|config| OAuthStrategy::new(provider, config)),
            )
        };
        let google = build(Provider::Google)?;
        let facebook = build(Provider::Facebook)?;

        for (provider, strategy) in [(Provider::Google, &google), (Provider::Facebook, &facebook)] {
            if strategy.is_none() {
                tracing::warn!(%provider, "provider credentials not set, sign-in disabled");
            }
        }

        Self::new(google, facebook)
    }

    /// Local login only.
    pub fn none() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn get(&self, provider: Provider) -> Result<&OAuthStrategy> {
        let strategy = match provider {
            Provider::Google => self.google.as_ref(),
            Provider::Facebook => self.facebook.as_ref(),
        };
        strategy.ok_or(AuthError::ProviderNotConfigured(provider.as_str()))
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

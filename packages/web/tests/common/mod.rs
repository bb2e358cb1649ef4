#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use auth::oauth::OAuthConfig;
use auth::settings::{self, MIN_SESSION_SECRET_LEN};
use auth::{OAuthStrategy, Provider, Strategies};
use store::MemoryStore;
use web::AppState;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_strategies(Strategies::none().unwrap())
    }

    /// Google configured with dummy credentials, Facebook left out.
    pub fn with_google() -> Self {
        let credentials = settings::Provider {
            client_id: "test-client".into(),
            client_secret: "test-secret".into(),
            redirect_url: None,
        };
        let config = OAuthConfig::new(
            Provider::Google,
            &credentials,
            "http://localhost:3000/auth/google/secrets",
        )
        .unwrap();
        let google = OAuthStrategy::new(Provider::Google, config);
        Self::with_strategies(Strategies::new(Some(google), None).unwrap())
    }

    pub fn with_strategies(strategies: Strategies) -> Self {
        let store = MemoryStore::new();
        let session = settings::Session {
            secret: "k".repeat(MIN_SESSION_SECRET_LEN),
            secure: false,
            inactivity_days: 7,
        };
        let router = web::app(
            AppState::new(store.clone(), strategies),
            tower_sessions::MemoryStore::default(),
            &session,
        )
        .unwrap();
        Self { router, store }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Register through the form and return the session cookie.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/register",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert_eq!(location(&response), "/secrets");
        session_cookie(&response).expect("registration sets a session cookie")
    }
}

pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// The `id=...` pair from the response's session cookie, if one was set.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("id="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Token and profile endpoints standing in for a federated provider. Every exchange
/// succeeds and every profile lookup reports the same provider-side id.
pub struct ProviderStub {
    pub base_url: String,
}

#[derive(serde::Serialize)]
struct StubToken {
    access_token: &'static str,
    token_type: &'static str,
    expires_in: u64,
}

#[derive(serde::Serialize)]
struct StubProfile {
    sub: String,
    id: String,
}

impl ProviderStub {
    pub async fn start(user_id: &str) -> Self {
        use axum::routing::{get, post};
        use axum::Json;

        let user_id = user_id.to_string();
        let router = Router::new()
            .route(
                "/token",
                post(|| async {
                    Json(StubToken {
                        access_token: "stub-access-token",
                        token_type: "bearer",
                        expires_in: 3600,
                    })
                }),
            )
            .route(
                "/userinfo",
                get(move || {
                    let id = user_id.clone();
                    async move {
                        Json(StubProfile {
                            sub: id.clone(),
                            id,
                        })
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn strategy(&self, provider: Provider) -> OAuthStrategy {
        let credentials = settings::Provider {
            client_id: "test-client".into(),
            client_secret: "test-secret".into(),
            redirect_url: None,
        };
        let config = OAuthConfig::with_endpoints(
            &credentials,
            &format!("{}/authorize", self.base_url),
            &format!("{}/token", self.base_url),
            &format!("{}/userinfo", self.base_url),
            &format!("http://localhost:3000/auth/{provider}/secrets"),
        )
        .unwrap();
        OAuthStrategy::new(provider, config)
    }
}

/// The `state` parameter of an authorization redirect.
pub fn state_param(location: &str) -> String {
    location
        .split(['?', '&'])
        .find_map(|pair| pair.strip_prefix("state="))
        .expect("authorization url carries a state")
        .to_string()
}

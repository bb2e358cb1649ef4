mod common;

use auth::{Provider, Strategies};
use common::{location, session_cookie, state_param, ProviderStub, TestApp};
use store::{ExternalId, UserStore};

/// Start a handshake as a fresh visitor; returns the session cookie and the state.
async fn begin(app: &TestApp, provider: &str) -> (String, String) {
    let response = app.get(&format!("/auth/{provider}"), None).await;
    let state = state_param(location(&response));
    let cookie = session_cookie(&response).expect("handshake is kept in the session");
    (cookie, state)
}

#[tokio::test]
async fn test_google_sign_in_creates_user_and_session() {
    let provider = ProviderStub::start("google-user-1").await;
    let strategies = Strategies::new(Some(provider.strategy(Provider::Google)), None).unwrap();
    let app = TestApp::with_strategies(strategies);

    let (cookie, state) = begin(&app, "google").await;
    let response = app
        .get(
            &format!("/auth/google/secrets?code=auth-code&state={state}"),
            Some(&cookie),
        )
        .await;

    assert_eq!(location(&response), "/secrets");
    let cookie = session_cookie(&response).expect("sign-in rotates the session");

    assert_eq!(app.store.len(), 1);
    let user = app
        .store
        .find_or_create(&ExternalId::Google("google-user-1".into()))
        .await
        .unwrap();
    assert!(user.username.is_none());
    assert!(user.password_hash.is_none());
    assert_eq!(app.store.len(), 1);

    // The session is authenticated as that user.
    let response = app
        .post_form("/submit", "secret=signed+in+with+google", Some(&cookie))
        .await;
    assert_eq!(location(&response), "/secrets");
    let user = app.store.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(user.secret.as_deref(), Some("signed in with google"));
}

#[tokio::test]
async fn test_returning_facebook_user_is_not_duplicated() {
    let provider = ProviderStub::start("fb-42").await;
    let strategies = Strategies::new(None, Some(provider.strategy(Provider::Facebook))).unwrap();
    let app = TestApp::with_strategies(strategies);

    for _ in 0..2 {
        let (cookie, state) = begin(&app, "facebook").await;
        let response = app
            .get(
                &format!("/auth/facebook/secrets?code=auth-code&state={state}"),
                Some(&cookie),
            )
            .await;
        assert_eq!(location(&response), "/secrets");
    }

    let users = app.store.all();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].facebook_id.as_deref(), Some("fb-42"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_sign_ins_yield_one_user() {
    let provider = ProviderStub::start("never-seen").await;
    let strategies = Strategies::new(Some(provider.strategy(Provider::Google)), None).unwrap();
    let app = TestApp::with_strategies(strategies);

    let (cookie_a, state_a) = begin(&app, "google").await;
    let (cookie_b, state_b) = begin(&app, "google").await;
    let uri_a = format!("/auth/google/secrets?code=a&state={state_a}");
    let uri_b = format!("/auth/google/secrets?code=b&state={state_b}");

    let (a, b) = tokio::join!(
        app.get(&uri_a, Some(&cookie_a)),
        app.get(&uri_b, Some(&cookie_b)),
    );

    assert_eq!(location(&a), "/secrets");
    assert_eq!(location(&b), "/secrets");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_replayed_callback_is_rejected() {
    let provider = ProviderStub::start("google-user-2").await;
    let strategies = Strategies::new(Some(provider.strategy(Provider::Google)), None).unwrap();
    let app = TestApp::with_strategies(strategies);

    let (cookie, state) = begin(&app, "google").await;
    let uri = format!("/auth/google/secrets?code=auth-code&state={state}");

    let first = app.get(&uri, Some(&cookie)).await;
    assert_eq!(location(&first), "/secrets");
    let cookie = session_cookie(&first).unwrap();

    // The pending handshake was consumed by the first callback.
    let second = app.get(&uri, Some(&cookie)).await;
    assert_eq!(location(&second), "/login");
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn test_malformed_callback_query_redirects_to_login() {
    let app = TestApp::with_google();
    let (cookie, _) = begin(&app, "google").await;

    let response = app
        .get("/auth/google/secrets?state=a&state=b", Some(&cookie))
        .await;

    assert_eq!(location(&response), "/login");
    assert!(app.store.is_empty());
}

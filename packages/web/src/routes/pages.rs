//! Static pages; none of them require a session.

use axum::response::Html;

use crate::views;

pub async fn home() -> Html<String> {
    views::home()
}

pub async fn register() -> Html<String> {
    views::register()
}

pub async fn login() -> Html<String> {
    views::login()
}

pub async fn submit() -> Html<String> {
    views::submit()
}

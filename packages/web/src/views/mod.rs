//! Server-rendered pages.
//!
//! Each page is a dioxus component rendered to a full HTML document with
//! `dioxus-ssr`. Pages are rendered synchronously, after any data they need has been
//! loaded, so no `VirtualDom` is ever held across an `.await`.

use axum::response::Html;
use dioxus::prelude::*;

mod home;
mod layout;
mod login;
mod register;
mod secrets;
mod submit;

pub use home::Home;
pub use layout::{Layout, SocialButtons};
pub use login::Login;
pub use register::Register;
pub use secrets::{Secrets, SecretsProps};
pub use submit::Submit;

fn render(mut dom: VirtualDom) -> Html<String> {
    dom.rebuild_in_place();
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\">{}</html>",
        dioxus_ssr::render(&dom)
    ))
}

pub fn home() -> Html<String> {
    render(VirtualDom::new(Home))
}

pub fn register() -> Html<String> {
    render(VirtualDom::new(Register))
}

pub fn login() -> Html<String> {
    render(VirtualDom::new(Login))
}

pub fn submit() -> Html<String> {
    render(VirtualDom::new(Submit))
}

pub fn secrets(secrets: Vec<String>) -> Html<String> {
    render(VirtualDom::new_with_props(
        Secrets,
        SecretsProps::builder().secrets(secrets).build(),
    ))
}

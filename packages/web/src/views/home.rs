//! Landing page.

use dioxus::prelude::*;

use super::Layout;

#[component]
pub fn Home() -> Element {
    rsx! {
        Layout { title: "Secrets",
            div { class: "jumbotron centered",
                h1 { class: "display-3", "Secrets" }
                p { class: "lead", "Don't keep your secrets, share them anonymously!" }
                a { class: "btn btn-light btn-lg", href: "/register", role: "button", "Register" }
                a { class: "btn btn-dark btn-lg", href: "/login", role: "button", "Login" }
            }
        }
    }
}

use dioxus::prelude::*;

use super::Layout;

/// The list of every submitted secret.
#[component]
pub fn Secrets(secrets: Vec<String>) -> Element {
    rsx! {
        Layout { title: "Secrets",
            div { class: "jumbotron text-center",
                h1 { class: "display-3", "You've Discovered My Secret!" }
                for secret in secrets.iter() {
                    p { class: "secret-text", "{secret}" }
                }
                if secrets.is_empty() {
                    p { class: "no-secrets", "Nobody has shared a secret yet." }
                }
                hr {}
                a { class: "btn btn-light btn-lg", href: "/logout", role: "button", "Log Out" }
                a { class: "btn btn-dark btn-lg", href: "/submit", role: "button", "Submit a Secret" }
            }
        }
    }
}

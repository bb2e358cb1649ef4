//! Login page view with username/password form.

use dioxus::prelude::*;

use super::{Layout, SocialButtons};

/// Login page component.
#[component]
pub fn Login() -> Element {
    rsx! {
        Layout { title: "Login",
            div { class: "container",
                h1 { "Login" }
                form { action: "/login", method: "POST",
                    label { r#for: "username", "Email" }
                    input { r#type: "email", id: "username", name: "username", required: true }
                    label { r#for: "password", "Password" }
                    input { r#type: "password", id: "password", name: "password", required: true }
                    button { r#type: "submit", class: "btn btn-dark", "Login" }
                }
                SocialButtons { verb: "Sign In" }
            }
        }
    }
}

//! Registration page view with username/password form.

use dioxus::prelude::*;

use super::{Layout, SocialButtons};

/// Register page component.
#[component]
pub fn Register() -> Element {
    rsx! {
        Layout { title: "Register",
            div { class: "container",
                h1 { "Register" }
                form { action: "/register", method: "POST",
                    label { r#for: "username", "Email" }
                    input { r#type: "email", id: "username", name: "username", required: true }
                    label { r#for: "password", "Password" }
                    input { r#type: "password", id: "password", name: "password", required: true }
                    button { r#type: "submit", class: "btn btn-dark", "Register" }
                }
                SocialButtons { verb: "Sign Up" }
            }
        }
    }
}

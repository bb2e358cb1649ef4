use dioxus::prelude::*;

use super::Layout;

#[component]
pub fn Submit() -> Element {
    rsx! {
        Layout { title: "Submit a Secret",
            div { class: "container",
                h1 { class: "display-3", "Secrets" }
                p { class: "secret-prompt", "Don't keep your secrets, share them anonymously!" }
                form { action: "/submit", method: "POST",
                    input {
                        r#type: "text",
                        name: "secret",
                        placeholder: "What's your secret?",
                        required: true,
                    }
                    button { r#type: "submit", class: "btn btn-dark", "Submit" }
                }
            }
        }
    }
}

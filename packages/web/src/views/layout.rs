use dioxus::prelude::*;

/// `head` and `body` of every page; `render` wraps them in the `html` element.
#[component]
pub fn Layout(title: String, children: Element) -> Element {
    rsx! {
        head {
            meta { charset: "utf-8" }
            meta { name: "viewport", content: "width=device-width, initial-scale=1" }
            title { "{title}" }
        }
        body {
            {children}
            footer { class: "footer", p { "Secrets" } }
        }
    }
}

/// Links that start a federated sign-in.
#[component]
pub fn SocialButtons(verb: String) -> Element {
    rsx! {
        div { class: "social-buttons",
            a { class: "btn btn-google", href: "/auth/google", role: "button",
                "{verb} with Google"
            }
            a { class: "btn btn-facebook", href: "/auth/facebook", role: "button",
                "{verb} with Facebook"
            }
        }
    }
}

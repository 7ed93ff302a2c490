use dioxus::prelude::*;

/// Splash shown while a restored session is being verified.
#[component]
pub fn TokenProgress() -> Element {
    rsx! {
        div {
            class: "token-progress",
            div { class: "progress", div { class: "progress-bar indeterminate" } }
            p {
                class: "view-muted",
                "Checking security issues on your browser and verifying your credentials. Please wait..."
            }
        }
    }
}

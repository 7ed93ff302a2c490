use dioxus::prelude::*;

use super::{LoginForm, RegistrationForm};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthTab {
    Login,
    Registration,
}

/// Entry point for signed-out users: log in or register.
#[component]
pub fn Authentication() -> Element {
    let mut tab = use_signal(|| AuthTab::Login);
    let tab_class = move |which: AuthTab| if tab() == which { "tab active" } else { "tab" };

    rsx! {
        section {
            class: "auth-panel",
            div {
                class: "tab-list",
                role: "tablist",
                button {
                    r#type: "button",
                    class: tab_class(AuthTab::Login),
                    onclick: move |_| tab.set(AuthTab::Login),
                    "Log in"
                }
                button {
                    r#type: "button",
                    class: tab_class(AuthTab::Registration),
                    onclick: move |_| tab.set(AuthTab::Registration),
                    "Registration"
                }
            }
            if tab() == AuthTab::Login {
                LoginForm {}
            } else {
                RegistrationForm {}
            }
        }
    }
}

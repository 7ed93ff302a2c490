use chrono::Datelike;
use dioxus::prelude::*;

use crate::flows::today;
use crate::use_config;

const DEVELOPER: &str = "Serking";
const DEVELOPER_URL: &str = "https://github.com/kingdeorayom";

fn copyright(year: i32) -> String {
    format!("© {year} Serking de Orayom")
}

#[component]
pub fn Header() -> Element {
    let config = use_config();
    rsx! {
        header {
            class: "site-header",
            h1 { class: "site-title", "{config.event.title}" }
            h2 { class: "site-subtitle", "Secret Santa Generator" }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    let copyright = copyright(today().year());
    rsx! {
        footer {
            class: "site-footer",
            p {
                "Developed by "
                a {
                    href: DEVELOPER_URL,
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{DEVELOPER}"
                }
                "."
            }
            p { "{copyright}" }
        }
    }
}

/// Header, centred main column, footer.
#[component]
pub fn Layout(children: Element) -> Element {
    rsx! {
        Header {}
        main { class: "site-main", {children} }
        Footer {}
    }
}

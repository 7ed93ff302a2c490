use dioxus::prelude::*;
use store::Priority;

use crate::icons::FaXmark;
use crate::Icon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Error,
    Success,
    Info,
}

/// A banner. Dismissible when `on_dismiss` is given.
#[component]
pub fn Alert(
    message: String,
    #[props(default)] kind: AlertKind,
    on_dismiss: Option<EventHandler<()>>,
) -> Element {
    let class = match kind {
        AlertKind::Error => "alert alert-error",
        AlertKind::Success => "alert alert-success",
        AlertKind::Info => "alert alert-info",
    };
    rsx! {
        div {
            class,
            role: "alert",
            span { "{message}" }
            if let Some(handler) = on_dismiss {
                button {
                    r#type: "button",
                    class: "alert-dismiss",
                    title: "Dismiss",
                    onclick: move |_| handler.call(()),
                    Icon { icon: FaXmark, width: 12, height: 12 }
                }
            }
        }
    }
}

#[component]
pub fn Card(#[props(default)] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

#[component]
pub fn PriorityBadge(priority: Priority) -> Element {
    let class = match priority {
        Priority::High => "badge badge-high",
        Priority::Medium => "badge badge-medium",
        Priority::Low => "badge badge-low",
    };
    rsx! {
        span { class, "{priority}" }
    }
}

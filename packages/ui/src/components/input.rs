use dioxus::prelude::*;

use crate::icons::{FaEye, FaEyeSlash};
use crate::Icon;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "field-label", r#for: "{html_for}", {children} }
    }
}

/// A single-line text input. `invalid` outlines it in the error colour.
#[component]
pub fn Input(
    id: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    #[props(default)] disabled: bool,
    #[props(default)] invalid: bool,
    #[props(default)] class: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let state = if invalid { "field-input invalid" } else { "field-input" };
    rsx! {
        input {
            id: "{id}",
            class: "{state} {class}",
            r#type: "{kind}",
            placeholder: "{placeholder}",
            value: "{value}",
            disabled,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Textarea(
    id: String,
    value: String,
    #[props(default)] placeholder: String,
    #[props(default = 3)] rows: u32,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        textarea {
            id: "{id}",
            class: "field-input",
            placeholder: "{placeholder}",
            rows: "{rows}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt),
        }
    }
}

/// A `<select>` over `(value, label)` pairs with a disabled placeholder entry.
#[component]
pub fn Select(
    id: String,
    value: String,
    options: Vec<(String, String)>,
    #[props(default)] placeholder: String,
    #[props(default)] invalid: bool,
    onchange: EventHandler<FormEvent>,
) -> Element {
    let state = if invalid { "field-input invalid" } else { "field-input" };
    rsx! {
        select {
            id: "{id}",
            class: "{state}",
            value: "{value}",
            onchange: move |evt| onchange.call(evt),
            if !placeholder.is_empty() {
                option { value: "", disabled: true, selected: value.is_empty(), "{placeholder}" }
            }
            for (option_value, label) in options {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: option_value == value,
                    "{label}"
                }
            }
        }
    }
}

/// Inline validation message under a field; renders nothing without one.
#[component]
pub fn FieldError(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p { class: "field-error", "{message}" }
        }
    }
}

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordInput(
    id: String,
    value: String,
    #[props(default)] placeholder: String,
    #[props(default)] invalid: bool,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let mut visible = use_signal(|| false);
    let kind = if visible() { "text" } else { "password" };

    rsx! {
        div {
            class: "password-field",
            Input {
                id,
                value,
                kind: kind.to_string(),
                placeholder,
                invalid,
                oninput: move |evt| oninput.call(evt),
            }
            button {
                r#type: "button",
                class: "password-toggle",
                title: if visible() { "Hide password" } else { "Show password" },
                onclick: move |_| visible.set(!visible()),
                if visible() {
                    Icon { icon: FaEyeSlash, width: 14, height: 14 }
                } else {
                    Icon { icon: FaEye, width: 14, height: 14 }
                }
            }
        }
    }
}

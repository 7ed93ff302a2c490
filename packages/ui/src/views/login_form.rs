use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::busy::{use_requests, BusyLabel};
use crate::components::{Alert, Button, FieldError, Input, Label, PasswordInput};
use crate::flows::auth::{self, LoginForm as LoginFields};
use crate::flows::{FieldErrors, FlowError, SubmitState};
use crate::{use_api, use_session_store};

use super::ForgotPasswordDialog;

/// Code name and password. A successful login fills the session; the router
/// shell takes it from there.
#[component]
pub fn LoginForm() -> Element {
    let api = use_api();
    let session = use_session_store();
    let requests = use_requests();
    let mut fields = use_signal(LoginFields::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut state = use_signal(SubmitState::default);
    let mut forgot_open = use_signal(|| false);

    let busy = state.read().is_busy();
    let banner = state.read().error().map(str::to_string);
    let slow = requests.is_slow();

    let handle_submit = move |_: MouseEvent| {
        if !state.write().begin() {
            return;
        }
        errors.set(FieldErrors::new());
        let api = api.clone();
        let session = session.clone();
        let requests = requests.clone();
        let form = fields();
        spawn_forever(async move {
            let Ok(result) = requests.run(auth::login(&api, &session, &form)).await else {
                return;
            };
            if let Err(FlowError::Invalid(invalid)) = &result {
                errors.set(invalid.clone());
            }
            state.write().finish(&result);
        });
    };

    rsx! {
        div {
            class: "auth-form",
            if let Some(message) = banner {
                Alert { message, on_dismiss: move |_| state.set(SubmitState::Idle) }
            }

            div {
                class: "mb-4",
                Label { html_for: "login-code-name", "Code name" }
                Input {
                    id: "login-code-name",
                    value: fields.read().code_name.clone(),
                    placeholder: "Your code name",
                    invalid: errors.read().get("codeName").is_some(),
                    oninput: move |evt: FormEvent| fields.write().code_name = evt.value(),
                }
                FieldError { message: errors.read().get("codeName").map(str::to_string) }
            }

            div {
                class: "mb-4",
                Label { html_for: "login-password", "Password" }
                PasswordInput {
                    id: "login-password",
                    value: fields.read().password.clone(),
                    invalid: errors.read().get("password").is_some(),
                    oninput: move |evt: FormEvent| fields.write().password = evt.value(),
                }
                FieldError { message: errors.read().get("password").map(str::to_string) }
            }

            Button {
                class: "w-full",
                disabled: busy,
                onclick: handle_submit,
                BusyLabel { busy, slow, idle: "Log in", working: "Logging in..." }
            }

            button {
                r#type: "button",
                class: "link-button",
                onclick: move |_| forgot_open.set(true),
                "I forgot my password"
            }

            if forgot_open() {
                ForgotPasswordDialog { on_close: move |_| forgot_open.set(false) }
            }
        }
    }
}

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::busy::{use_requests, BusyLabel};
use crate::components::{Alert, AlertKind, Button, Dialog, FieldError, Input, Label, PasswordInput};
use crate::flows::auth::{self, ForgotPasswordForm, PASSWORD_CHANGED, PASSWORD_RESET_CLOSED};
use crate::flows::{today, FieldErrors, FlowError, SubmitState};
use crate::{use_api, use_config};

/// Password reset by code name. Past the reset cutoff only a notice is shown.
#[component]
pub fn ForgotPasswordDialog(on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let config = use_config();
    let requests = use_requests();
    let mut fields = use_signal(ForgotPasswordForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut state = use_signal(SubmitState::default);

    let open = config.event.password_reset_open(today());
    let busy = state.read().is_busy();
    let slow = requests.is_slow();
    let banner = state.read().error().map(str::to_string);
    let succeeded = *state.read() == SubmitState::Success;

    let calendar = config.event.clone();
    let handle_submit = move |_: MouseEvent| {
        if !state.write().begin() {
            return;
        }
        errors.set(FieldErrors::new());
        let api = api.clone();
        let calendar = calendar.clone();
        let requests = requests.clone();
        let form = fields();
        spawn_forever(async move {
            let reset = auth::reset_password(&api, &calendar, today(), &form);
            let Ok(result) = requests.run(reset).await else {
                return;
            };
            match &result {
                Ok(()) => fields.set(ForgotPasswordForm::default()),
                Err(FlowError::Invalid(invalid)) => errors.set(invalid.clone()),
                Err(_) => {}
            }
            state.write().finish(&result);
        });
    };

    rsx! {
        Dialog {
            title: "I forgot my password",
            on_close: move |_| {
                if !state.read().is_busy() {
                    on_close.call(());
                }
            },
            if !open {
                p { class: "view-muted", "{PASSWORD_RESET_CLOSED}" }
            } else {
                if succeeded {
                    Alert { kind: AlertKind::Success, message: PASSWORD_CHANGED.to_string() }
                }
                if let Some(message) = banner {
                    Alert { message, on_dismiss: move |_| state.set(SubmitState::Idle) }
                }

                div {
                    class: "mb-4",
                    Label { html_for: "reset-code-name", "Code name" }
                    Input {
                        id: "reset-code-name",
                        value: fields.read().code_name.clone(),
                        invalid: errors.read().get("codeName").is_some(),
                        oninput: move |evt: FormEvent| fields.write().code_name = evt.value(),
                    }
                    FieldError { message: errors.read().get("codeName").map(str::to_string) }
                }

                div {
                    class: "mb-4",
                    Label { html_for: "reset-new-password", "New password" }
                    PasswordInput {
                        id: "reset-new-password",
                        value: fields.read().new_password.clone(),
                        invalid: errors.read().get("newPassword").is_some(),
                        oninput: move |evt: FormEvent| fields.write().new_password = evt.value(),
                    }
                    FieldError { message: errors.read().get("newPassword").map(str::to_string) }
                }

                div {
                    class: "mb-4",
                    Label { html_for: "reset-confirm-password", "Confirm password" }
                    PasswordInput {
                        id: "reset-confirm-password",
                        value: fields.read().confirm_password.clone(),
                        invalid: errors.read().get("confirmPassword").is_some(),
                        oninput: move |evt: FormEvent| fields.write().confirm_password = evt.value(),
                    }
                    FieldError { message: errors.read().get("confirmPassword").map(str::to_string) }
                }

                Button {
                    class: "w-full",
                    disabled: busy,
                    onclick: handle_submit,
                    BusyLabel { busy, slow, idle: "Change password", working: "Changing password..." }
                }
            }
        }
    }
}

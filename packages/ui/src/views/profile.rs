use dioxus::core::spawn_forever;
use dioxus::prelude::*;

use crate::busy::{use_requests, BusyLabel};
use crate::components::{Alert, AlertKind, Button, ButtonVariant, Card, Dialog, FieldError, Label, PasswordInput};
use crate::flows::auth::{self, ChangePasswordForm, PASSWORD_CHANGED};
use crate::flows::{FieldErrors, FlowError, SubmitState};
use crate::{use_api, use_auth, use_session_store, LogoutButton};

/// Name and code name of the signed-in user, password change and log out.
#[component]
pub fn Profile() -> Element {
    let auth = use_auth();
    let mut change_open = use_signal(|| false);

    let (name, code_name) = auth
        .read()
        .user()
        .map(|user| (user.name.clone(), user.code_name.clone()))
        .unwrap_or_default();

    rsx! {
        Card {
            h3 { class: "card-title", "{name}" }
            p { class: "view-muted", "{code_name}" }
            hr {}
            p {
                class: "view-muted text-xs",
                "Editing profile details are prohibited to avoid any possible form of confusion."
            }
            div {
                class: "dialog-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| change_open.set(true),
                    "Change password"
                }
                LogoutButton {}
            }
        }

        if change_open() {
            ChangePasswordDialog { on_close: move |_| change_open.set(false) }
        }
    }
}

#[component]
fn ChangePasswordDialog(on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let session = use_session_store();
    let requests = use_requests();
    let mut fields = use_signal(ChangePasswordForm::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut state = use_signal(SubmitState::default);

    let busy = state.read().is_busy();
    let slow = requests.is_slow();
    let banner = state.read().error().map(str::to_string);
    let succeeded = *state.read() == SubmitState::Success;

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
            let change = auth::change_password(&api, &session, &form);
            let Ok(result) = requests.run(change).await else {
                return;
            };
            match &result {
                Ok(()) => fields.set(ChangePasswordForm::default()),
                Err(FlowError::Invalid(invalid)) => errors.set(invalid.clone()),
                Err(_) => {}
            }
            state.write().finish(&result);
        });
    };

    rsx! {
        Dialog {
            title: "Change password",
            on_close: move |_| {
                if !state.read().is_busy() {
                    on_close.call(());
                }
            },
            if succeeded {
                Alert { kind: AlertKind::Success, message: PASSWORD_CHANGED.to_string() }
            }
            if let Some(message) = banner {
                Alert { message, on_dismiss: move |_| state.set(SubmitState::Idle) }
            }

            div {
                class: "mb-4",
                Label { html_for: "current-password", "Current password" }
                PasswordInput {
                    id: "current-password",
                    value: fields.read().current_password.clone(),
                    invalid: errors.read().get("currentPassword").is_some(),
                    oninput: move |evt: FormEvent| fields.write().current_password = evt.value(),
                }
                FieldError { message: errors.read().get("currentPassword").map(str::to_string) }
            }

            div {
                class: "mb-4",
                Label { html_for: "new-password", "New password" }
                PasswordInput {
                    id: "new-password",
                    value: fields.read().new_password.clone(),
                    invalid: errors.read().get("newPassword").is_some(),
                    oninput: move |evt: FormEvent| fields.write().new_password = evt.value(),
                }
                FieldError { message: errors.read().get("newPassword").map(str::to_string) }
            }

            div {
                class: "mb-4",
                Label { html_for: "confirm-password", "Confirm password" }
                PasswordInput {
                    id: "confirm-password",
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

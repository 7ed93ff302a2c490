//! Session context and hooks for the UI.
//!
//! [`AuthProvider`] owns the single [`SessionStore`] of the app. Views never
//! write to a global: they read the reactive [`AuthState`] and go through the
//! store (or a flow that takes it) to change anything. The store notifies the
//! provider, which mirrors the new session into the signal.

use api::{ApiClient, CancelScope};
use dioxus::prelude::*;
use store::{ClientConfig, Session, SessionStore, UserProfile};

use crate::components::{Button, ButtonVariant};
use crate::flows::auth::verify_session;
use crate::icons::FaRightFromBracket;
use crate::{make_session_store, Icon};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Session,
    /// True until a restored token has been checked against the server.
    pub loading: bool,
}

impl AuthState {
    pub fn logged_in(&self) -> bool {
        self.session.logged_in()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user.as_ref()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session_store() -> SessionStore {
    use_context::<SessionStore>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}

/// A [`CancelScope`] tied to the calling component and cancelled when the
/// component is dropped.
pub fn use_cancel_scope() -> CancelScope {
    let scope = use_hook(CancelScope::new);
    let on_drop = scope.clone();
    use_drop(move || on_drop.cancel());
    scope
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: ClientConfig, children: Element) -> Element {
    let session = use_context_provider(make_session_store);
    let base_url = config.api.base_url.clone();
    let store = session.clone();
    let api = use_context_provider(move || ApiClient::new(base_url, store));
    use_context_provider(move || config);

    let mut auth_state = use_signal(|| {
        let restored = session.session();
        AuthState {
            loading: restored.logged_in(),
            session: restored,
        }
    });
    use_context_provider(|| auth_state);

    let store = session.clone();
    let subscription = use_hook(move || {
        store.subscribe(move |current| {
            let mut auth_state = auth_state;
            auth_state.write().session = current.clone();
        })
    });
    use_drop(move || session.unsubscribe(subscription));

    // Check a restored token once on mount
    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            if auth_state.peek().loading {
                verify_session(&api, api.session()).await;
                auth_state.write().loading = false;
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(#[props(default = "Log out".to_string())] label: String) -> Element {
    let session = use_session_store();

    rsx! {
        Button {
            variant: ButtonVariant::Outline,
            onclick: move |_| {
                tracing::info!("signing out");
                session.clear();
            },
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { class: "ml-2", "{label}" }
        }
    }
}

//! This crate contains all shared UI for the workspace.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`flows`] | validation, state machines and async operations, renderer-free |
//! | [`components`] | buttons, inputs, dialogs, banners |
//! | [`views`] | the screens: authentication, picker, wishlist, profile |
//!
//! Everything below the views talks to the server through the [`api::ApiClient`]
//! provided by [`AuthProvider`], and to the session through its
//! [`store::SessionStore`].

use dioxus::prelude::*;

pub mod components;
pub mod flows;
pub mod views;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const THEME_CSS: Asset = asset!("/assets/theme.css");

mod session;
pub use session::make_session_store;

mod auth;
pub use auth::{
    use_api, use_auth, use_cancel_scope, use_config, use_session_store, AuthProvider, AuthState,
    LogoutButton,
};

pub mod busy;
pub use busy::{use_requests, BusyLabel, Requests, TAKING_LONGER};

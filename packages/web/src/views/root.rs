//! Entry point: splash while the session is verified, then either the
//! authentication tabs or a redirect into the signed-in area.

use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{Authentication, Layout, TokenProgress};

use crate::Route;

#[component]
pub fn Root() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth();
        if !state.loading && state.logged_in() {
            nav.replace(Route::Home {});
        }
    });

    let state = auth();
    rsx! {
        Layout {
            if state.loading {
                TokenProgress {}
            } else if !state.logged_in() {
                Authentication {}
            }
        }
    }
}

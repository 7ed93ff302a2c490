use dioxus::prelude::*;
use ui::use_auth;
use ui::views::{Layout, TokenProgress};

use crate::Route;

/// Layout for every signed-in route. Sends the user back to `/` as soon as
/// the session loses its token, whoever cleared it.
#[component]
pub fn AuthenticatedShell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if !auth().logged_in() {
            tracing::info!("no session, returning to the entry point");
            nav.replace(Route::Root {});
        }
    });

    let state = auth();
    rsx! {
        Layout {
            if state.loading {
                TokenProgress {}
            } else if state.logged_in() {
                Outlet::<Route> {}
            }
        }
    }
}

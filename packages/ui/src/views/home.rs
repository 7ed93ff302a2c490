use dioxus::prelude::*;

use super::{MyWishlist, ParticipantPicker, Profile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HomeTab {
    Pick,
    Wishlist,
    Profile,
}

impl HomeTab {
    const ALL: [HomeTab; 3] = [HomeTab::Pick, HomeTab::Wishlist, HomeTab::Profile];

    fn label(&self) -> &'static str {
        match self {
            HomeTab::Pick => "Pick a participant",
            HomeTab::Wishlist => "My wishlist",
            HomeTab::Profile => "Profile",
        }
    }
}

/// The signed-in area: picking, the user's own wishlist and their profile.
#[component]
pub fn HomeView() -> Element {
    let mut tab = use_signal(|| HomeTab::Pick);

    rsx! {
        section {
            class: "home",
            div {
                class: "tab-list",
                role: "tablist",
                for which in HomeTab::ALL {
                    button {
                        key: "{which.label()}",
                        r#type: "button",
                        class: if tab() == which { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(which),
                        "{which.label()}"
                    }
                }
            }
            {match tab() {
                HomeTab::Pick => rsx! { ParticipantPicker {} },
                HomeTab::Wishlist => rsx! { MyWishlist {} },
                HomeTab::Profile => rsx! { Profile {} },
            }}
        }
    }
}

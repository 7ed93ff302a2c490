//! The pick card, the recipient's details and their wishlist.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::RecipientView;

use crate::busy::use_requests;
use crate::components::{Alert, AlertKind, Button, Card, Dialog, PriorityBadge};
use crate::flows::pick::{self, PickOutcome, PickState};
use crate::flows::today;
use crate::icons::FaGift;
use crate::{use_api, use_auth, use_config, use_session_store, Icon};

const SHUFFLE_NOTICE: &str = "The selection of participants has been randomized utilizing the \
Fisher-Yates shuffle algorithm. This technique ensures an equitable and unbiased arrangement of \
participants, ensuring that the order of the participants is genuinely random. Be assured that the \
outcome is not predetermined, and each participant has an equal opportunity to appear in any position.";

#[component]
pub fn ParticipantPicker() -> Element {
    let api = use_api();
    let session = use_session_store();
    let config = use_config();
    let auth = use_auth();
    let requests = use_requests();

    let mut state = use_signal(|| PickState::from_profile(auth.peek().user()));
    let mut recipient = use_signal(|| Option::<RecipientView>::None);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut why_open = use_signal(|| false);
    let mut learn_more_open = use_signal(|| false);

    // Fetch the bound recipient's wishlist on mount
    let loader = (api.clone(), session.clone(), requests.clone());
    let _ = use_resource(move || {
        let (api, session, requests) = loader.clone();
        async move {
            match requests.fetch(pick::load_recipient(&api, &session)).await {
                Ok(Ok(Some(view))) => recipient.set(Some(view)),
                Ok(Ok(None)) | Err(_) => {}
                Ok(Err(err)) => banner.set(err.banner()),
            }
        }
    });

    let calendar = config.event.clone();
    let opens = calendar.pick_opens.format("%B %-d, %Y").to_string();
    let why_text = format!(
        "Picking participants is not allowed until {opens} to ensure a fair and unbiased drawing \
         process. Allowing at least one user to pick earlier might lead to an insufficient number of \
         available participants, potentially disrupting the intended randomness of the selection. By \
         waiting until the specified date, we aim to maximize participation and maintain the integrity \
         of the participant drawing."
    );
    let can_start = state.read().can_start(&calendar, today());
    let picking = *state.read() == PickState::Picking;
    let picked = *state.read() == PickState::Picked;
    let slow = requests.is_slow();

    let handle_pick = move |_: MouseEvent| {
        let today = today();
        if !state.write().begin(&calendar, today) {
            return;
        }
        banner.set(None);
        let api = api.clone();
        let session = session.clone();
        let calendar = calendar.clone();
        let requests = requests.clone();
        spawn_forever(async move {
            let outcome = requests.run(pick::pick(&api, &session, &calendar, today)).await;
            let Ok(result) = outcome else {
                return;
            };
            state.write().finish(&result);
            match result {
                Ok(PickOutcome::Picked(view)) => {
                    recipient.set(Some(view));
                    if let Ok(loaded) = requests.fetch(pick::load_recipient(&api, &session)).await {
                        match loaded {
                            Ok(Some(view)) => recipient.set(Some(view)),
                            Ok(None) => {}
                            Err(err) => banner.set(err.banner()),
                        }
                    }
                }
                Ok(PickOutcome::Unavailable) => {}
                Err(err) => banner.set(err.banner()),
            }
        });
    };

    rsx! {
        section {
            class: "picker",
            if let Some(message) = banner() {
                Alert { message, on_dismiss: move |_| banner.set(None) }
            }

            if picked {
                if let Some(view) = recipient() {
                    Card {
                        p { class: "view-muted", "The participant you picked was..." }
                        h3 { class: "card-title", "{view.code_name}" }
                        button {
                            r#type: "button",
                            class: "link-button",
                            onclick: move |_| learn_more_open.set(true),
                            "Learn more"
                        }
                        hr {}
                        p {
                            class: "view-muted text-xs",
                            "Be sure to give them a considerate gift, and take a look at their wishlist if they've included one for reference."
                        }
                    }
                    RecipientWishlist { recipient: view.clone() }
                } else {
                    p { class: "view-muted", "Loading the participant you picked..." }
                }
            } else if picking {
                div {
                    class: "picker-status",
                    Icon { icon: FaGift, width: 48, height: 48 }
                    if slow {
                        p { "Taking longer than usual. Please be patient..." }
                        p { "Don't close the page as it may interrupt the picking process." }
                    } else {
                        p { "Picking a participant. Please wait..." }
                    }
                }
            } else {
                Alert {
                    kind: AlertKind::Info,
                    message: "Picking a participant is a one-time process and cannot be reverted.",
                }
                div {
                    class: "picker-status",
                    if can_start {
                        p { "You haven't picked a participant yet." }
                    } else {
                        p { "Picking a participant is not allowed until {opens}." }
                        p { "For the meantime, why not add some items to your wishlist?" }
                    }
                    Button {
                        disabled: !can_start,
                        onclick: handle_pick,
                        "Pick a participant"
                    }
                    if !can_start {
                        button {
                            r#type: "button",
                            class: "link-button",
                            onclick: move |_| why_open.set(true),
                            "Why picking a participant is not yet allowed?"
                        }
                    }
                }
            }

            if why_open() {
                Dialog {
                    title: "Why picking a participant is not yet allowed?",
                    on_close: move |_| why_open.set(false),
                    p { "{why_text}" }
                }
            }

            if learn_more_open() {
                Dialog {
                    title: "Shuffling Method",
                    on_close: move |_| learn_more_open.set(false),
                    p { "{SHUFFLE_NOTICE}" }
                }
            }
        }
    }
}

/// Read-only view of the recipient's wishlist.
#[component]
pub fn RecipientWishlist(recipient: RecipientView) -> Element {
    let code_name = recipient.code_name;
    let items = recipient.wishlist;
    let empty = items.is_empty();

    rsx! {
        Card {
            class: "mt-5",
            h3 { class: "card-title", "{code_name}'s wishlist" }
            hr {}
            p {
                class: "view-muted text-xs",
                "Feel free to periodically check the app while the event hasn't started, as {code_name} might update their wishlist if they haven't done so already."
            }
        }

        if empty {
            p { class: "empty-state", "{code_name}'s wishlist is empty" }
        }
        for item in items {
            Card {
                key: "{item.id}",
                class: "mt-4",
                PriorityBadge { priority: item.priority }
                p { class: "item-title", "{item.title}" }
                if !item.description.is_empty() {
                    p { class: "view-muted", "{item.description}" }
                }
                hr {}
                p { class: "text-xs font-semibold", "Where you can buy:" }
                if item.links.is_empty() {
                    p { class: "empty-state", "No information provided" }
                }
                for link in item.links {
                    a {
                        class: "item-link",
                        href: "{link}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "{link}"
                    }
                }
            }
        }
    }
}

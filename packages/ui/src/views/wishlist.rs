//! The signed-in user's own wishlist: list, add dialog, confirmed removal.

use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use store::{Priority, WishlistItem};

use crate::busy::{use_requests, BusyLabel};
use crate::components::{
    Alert, AlertKind, Button, ButtonVariant, Card, Dialog, FieldError, Input, Label, PriorityBadge,
    Select, Textarea,
};
use crate::flows::wishlist::{self, Wishlist, WishlistDraft, WISHLIST_CLOSED};
use crate::flows::{today, FieldErrors, FlowError, SubmitState};
use crate::icons::{FaPlus, FaTrash};
use crate::{use_api, use_config, use_session_store, Icon};

#[component]
pub fn MyWishlist() -> Element {
    let api = use_api();
    let session = use_session_store();
    let config = use_config();
    let requests = use_requests();

    let mut list = use_signal(Wishlist::default);
    let mut loaded = use_signal(|| false);
    let mut banner = use_signal(|| Option::<String>::None);
    let mut add_open = use_signal(|| false);
    let mut pending_removal = use_signal(|| Option::<WishlistItem>::None);
    let mut remove_state = use_signal(SubmitState::default);

    let loader = (api.clone(), session.clone(), requests.clone());
    let _ = use_resource(move || {
        let (api, session, requests) = loader.clone();
        async move {
            let Ok(result) = requests.fetch(wishlist::load(&api, &session)).await else {
                return;
            };
            match result {
                Ok(items) => list.set(Wishlist::new(items)),
                Err(err) => banner.set(err.banner()),
            }
            loaded.set(true);
        }
    });

    let adding_open = config.event.wishlist_open(today());
    let removing = remove_state.read().is_busy();
    let remove_error = remove_state.read().error().map(str::to_string);
    let slow = requests.is_slow();

    let handle_remove = move |_: MouseEvent| {
        let Some(item) = pending_removal() else {
            return;
        };
        if !remove_state.write().begin() {
            return;
        }
        let api = api.clone();
        let session = session.clone();
        let requests = requests.clone();
        spawn_forever(async move {
            let Ok(result) = requests.run(wishlist::remove(&api, &session, &item.id)).await else {
                return;
            };
            if result.is_ok() {
                list.write().remove(&item.id);
                pending_removal.set(None);
            }
            remove_state.write().finish(&result);
        });
    };

    rsx! {
        section {
            class: "wishlist",
            if let Some(message) = banner() {
                Alert { message, on_dismiss: move |_| banner.set(None) }
            }

            div {
                class: "wishlist-header",
                h3 { class: "card-title", "My wishlist" }
                Button {
                    disabled: !adding_open,
                    onclick: move |_| add_open.set(true),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    span { class: "ml-2", "Add item" }
                }
            }
            if !adding_open {
                Alert { kind: AlertKind::Info, message: WISHLIST_CLOSED.to_string() }
            }

            if !loaded() {
                p { class: "view-muted", "Loading your wishlist..." }
            } else if list.read().is_empty() {
                p { class: "empty-state", "Your wishlist is empty" }
            }

            for item in list.read().items().iter().cloned() {
                Card {
                    key: "{item.id}",
                    class: "mt-4",
                    div {
                        class: "wishlist-item-header",
                        PriorityBadge { priority: item.priority }
                        Button {
                            variant: ButtonVariant::Ghost,
                            title: "Remove",
                            onclick: {
                                let item = item.clone();
                                move |_| {
                                    remove_state.set(SubmitState::Idle);
                                    pending_removal.set(Some(item.clone()));
                                }
                            },
                            Icon { icon: FaTrash, width: 12, height: 12 }
                        }
                    }
                    p { class: "item-title", "{item.title}" }
                    if !item.description.is_empty() {
                        p { class: "view-muted", "{item.description}" }
                    }
                    for link in item.links.iter() {
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

            if add_open() {
                AddItemDialog {
                    on_added: move |item: WishlistItem| {
                        list.write().insert(item);
                        add_open.set(false);
                    },
                    on_close: move |_| add_open.set(false),
                }
            }

            if let Some(item) = pending_removal() {
                Dialog {
                    title: "Remove item",
                    on_close: move |_| {
                        if !remove_state.read().is_busy() {
                            pending_removal.set(None);
                        }
                    },
                    if let Some(message) = remove_error {
                        Alert { message }
                    }
                    p { "Remove \"{item.title}\" from your wishlist? This cannot be undone." }
                    div {
                        class: "dialog-actions",
                        Button {
                            variant: ButtonVariant::Outline,
                            disabled: removing,
                            onclick: move |_| pending_removal.set(None),
                            "Cancel"
                        }
                        Button {
                            variant: ButtonVariant::Destructive,
                            disabled: removing,
                            onclick: handle_remove,
                            BusyLabel { busy: removing, slow, idle: "Remove", working: "Removing..." }
                        }
                    }
                }
            }
        }
    }
}

/// Title, priority, description and a link builder. Calls `on_added` with the
/// created item once the server accepted it.
#[component]
fn AddItemDialog(on_added: EventHandler<WishlistItem>, on_close: EventHandler<()>) -> Element {
    let api = use_api();
    let session = use_session_store();
    let config = use_config();
    let requests = use_requests();

    let mut draft = use_signal(WishlistDraft::default);
    let mut errors = use_signal(FieldErrors::new);
    let mut link_error = use_signal(|| Option::<String>::None);
    let mut state = use_signal(SubmitState::default);

    let busy = state.read().is_busy();
    let slow = requests.is_slow();
    let banner = state.read().error().map(str::to_string);
    let priorities: Vec<(String, String)> = Priority::ALL
        .iter()
        .map(|priority| (priority.as_str().to_string(), priority.as_str().to_string()))
        .collect();
    let selected = draft
        .read()
        .priority
        .map(|priority| priority.as_str().to_string())
        .unwrap_or_default();

    let calendar = config.event.clone();
    let handle_submit = move |_: MouseEvent| {
        if !state.write().begin() {
            return;
        }
        errors.set(FieldErrors::new());
        let api = api.clone();
        let session = session.clone();
        let calendar = calendar.clone();
        let requests = requests.clone();
        let form = draft();
        spawn_forever(async move {
            let add = wishlist::add(&api, &session, &calendar, today(), &form);
            let Ok(result) = requests.run(add).await else {
                return;
            };
            state.write().finish(&result);
            match result {
                Ok(item) => on_added.call(item),
                Err(FlowError::Invalid(invalid)) => errors.set(invalid),
                Err(_) => {}
            }
        });
    };

    let handle_add_link = move |_: MouseEvent| {
        let pushed = draft.write().push_link();
        link_error.set(pushed.err());
    };

    rsx! {
        Dialog {
            title: "Add item",
            on_close: move |_| {
                if !state.read().is_busy() {
                    on_close.call(());
                }
            },
            if let Some(message) = banner {
                Alert { message, on_dismiss: move |_| state.set(SubmitState::Idle) }
            }

            div {
                class: "mb-4",
                Label { html_for: "item-title", "Title" }
                Input {
                    id: "item-title",
                    value: draft.read().title.clone(),
                    invalid: errors.read().get("title").is_some(),
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
                FieldError { message: errors.read().get("title").map(str::to_string) }
            }

            div {
                class: "mb-4",
                Label { html_for: "item-priority", "Priority" }
                Select {
                    id: "item-priority",
                    value: selected,
                    options: priorities,
                    placeholder: "Select a priority",
                    invalid: errors.read().get("priority").is_some(),
                    onchange: move |evt: FormEvent| draft.write().priority = evt.value().parse().ok(),
                }
                FieldError { message: errors.read().get("priority").map(str::to_string) }
            }

            div {
                class: "mb-4",
                Label { html_for: "item-description", "Description (optional)" }
                Textarea {
                    id: "item-description",
                    value: draft.read().description.clone(),
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }

            div {
                class: "mb-4",
                Label { html_for: "item-link", "Where to buy (optional)" }
                div {
                    class: "link-builder",
                    Input {
                        id: "item-link",
                        value: draft.read().pending_link.clone(),
                        placeholder: "https://",
                        invalid: link_error.read().is_some() || errors.read().get("link").is_some(),
                        oninput: move |evt: FormEvent| {
                            draft.write().pending_link = evt.value();
                            link_error.set(None);
                        },
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: handle_add_link,
                        "Add link"
                    }
                }
                FieldError { message: link_error() }
                FieldError { message: errors.read().get("link").map(str::to_string) }
                for link in draft.read().links().iter() {
                    p { key: "{link}", class: "item-link", "{link}" }
                }
            }

            div {
                class: "dialog-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: busy,
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                Button {
                    disabled: busy,
                    onclick: handle_submit,
                    BusyLabel { busy, slow, idle: "Add item", working: "Adding..." }
                }
            }
        }
    }
}

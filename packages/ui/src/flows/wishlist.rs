//! The signed-in user's wishlist.
//!
//! Items are created from a [`WishlistDraft`] and removed by id; there is no
//! in-place edit. Adding closes on the calendar's wishlist cutoff, removing
//! never does.

use std::collections::BTreeSet;

use api::{Backend, Url};
use chrono::NaiveDate;
use store::{EventCalendar, NewWishlistItem, Priority, SessionStore, WishlistItem};

use super::{settle, FieldErrors, FlowError};

pub const LOAD_FAILED: &str = "An error occurred while loading your wishlist.";
pub const ADD_FAILED: &str = "An error occurred while adding the item.";
pub const REMOVE_FAILED: &str = "An error occurred while removing the item.";
pub const WISHLIST_CLOSED: &str = "The wishlist is closed for new items.";

const INVALID_LINK: &str = "Enter a valid link starting with http:// or https://.";

/// The add-item form, including the links collected so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WishlistDraft {
    pub title: String,
    pub priority: Option<Priority>,
    pub description: String,
    links: Vec<String>,
    pub pending_link: String,
}

impl WishlistDraft {
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Move the pending link into the list.
    pub fn push_link(&mut self) -> Result<(), String> {
        let link = self.pending_link.trim();
        let valid = Url::parse(link)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            return Err(INVALID_LINK.to_string());
        }
        if self.links.iter().any(|existing| existing == link) {
            return Err("This link is already in the list.".to_string());
        }
        self.links.push(link.to_string());
        self.pending_link.clear();
        Ok(())
    }

    pub fn validate(&self) -> Result<NewWishlistItem, FieldErrors> {
        let title = self.title.trim();
        let mut errors = FieldErrors::new();
        if title.is_empty() {
            errors.add("title", "Title is required.");
        }
        if self.priority.is_none() {
            errors.add("priority", "Select a priority.");
        }
        if !self.pending_link.trim().is_empty() {
            errors.add("link", "Add or clear the pending link first.");
        }
        match self.priority {
            Some(priority) if errors.is_empty() => Ok(NewWishlistItem {
                title: title.to_string(),
                priority,
                description: self.description.trim().to_string(),
                links: self.links.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Local copy of the list, kept in sync with successful requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn new(items: Vec<WishlistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> BTreeSet<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }

    /// Append a created item; an id already present is left alone.
    pub fn insert(&mut self, item: WishlistItem) {
        if !self.items.iter().any(|existing| existing.id == item.id) {
            self.items.push(item);
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<WishlistItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

fn signed_in_user_id(session: &SessionStore) -> Result<String, FlowError> {
    session
        .user()
        .filter(|_| session.session().logged_in())
        .map(|user| user.user_id)
        .ok_or(FlowError::SessionExpired)
}

pub async fn load<B: Backend>(
    backend: &B,
    session: &SessionStore,
) -> Result<Vec<WishlistItem>, FlowError> {
    let user_id = signed_in_user_id(session)?;
    settle(session, backend.get_wishlist(&user_id).await, LOAD_FAILED)
}

pub async fn add<B: Backend>(
    backend: &B,
    session: &SessionStore,
    calendar: &EventCalendar,
    today: NaiveDate,
    draft: &WishlistDraft,
) -> Result<WishlistItem, FlowError> {
    if !calendar.wishlist_open(today) {
        return Err(FlowError::Closed(WISHLIST_CLOSED.to_string()));
    }
    let item = draft.validate()?;
    let user_id = signed_in_user_id(session)?;
    let created = settle(
        session,
        backend.add_wishlist_item(&user_id, &item).await,
        ADD_FAILED,
    )?;
    tracing::info!(item = %created.id, "wishlist item added");
    Ok(created)
}

pub async fn remove<B: Backend>(
    backend: &B,
    session: &SessionStore,
    item_id: &str,
) -> Result<(), FlowError> {
    let user_id = signed_in_user_id(session)?;
    settle(
        session,
        backend.delete_wishlist_item(&user_id, item_id).await,
        REMOVE_FAILED,
    )?;
    tracing::info!(item = item_id, "wishlist item removed");
    Ok(())
}

//! # Data model shared by the session store, the API client and the views
//!
//! Every type here mirrors a JSON shape exchanged with the Secret Santa API.
//! Field names are camelCase on the wire and server-assigned identifiers arrive
//! as `_id` (`id` is accepted as an alias so hand-written fixtures stay short).
//!
//! | Type | Wire shape |
//! |------|------------|
//! | [`UserProfile`] | `{ userId, codeName, name, hasPicked, recipient }` |
//! | [`RecipientRef`] | `{ _id }` |
//! | [`WishlistItem`] | `{ _id, title, priority, description, links }` |
//! | [`NewWishlistItem`] | `{ title, priority, description, links }` (request body) |
//! | [`RecipientView`] | `{ _id, codeName, name, wishlists }` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The signed-in participant as cached in durable storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: String,
    pub code_name: String,
    pub name: String,
    #[serde(default)]
    pub has_picked: bool,
    #[serde(default)]
    pub recipient: Option<RecipientRef>,
}

impl UserProfile {
    /// Fold a newer copy of the same profile into this one.
    ///
    /// `has_picked` only ever goes from `false` to `true`, and once a recipient
    /// is bound it stays bound. A second, different recipient is ignored, and
    /// so is a profile for a different user.
    pub fn absorb(&mut self, newer: UserProfile) {
        let UserProfile {
            user_id,
            code_name,
            name,
            has_picked,
            recipient,
        } = newer;

        if self.user_id != user_id {
            tracing::warn!(
                cached = %self.user_id,
                incoming = %user_id,
                "ignoring profile for another user"
            );
            return;
        }
        self.code_name = code_name;
        self.name = name;
        self.has_picked |= has_picked;

        match (&self.recipient, recipient) {
            (None, incoming) => self.recipient = incoming,
            (Some(bound), Some(incoming)) if bound.id != incoming.id => {
                tracing::warn!(
                    bound = %bound.id,
                    incoming = %incoming.id,
                    "ignoring second recipient binding"
                );
            }
            _ => {}
        }
    }

    /// Identifier of the assigned recipient, if the pick already happened.
    pub fn recipient_id(&self) -> Option<&str> {
        self.recipient.as_ref().map(|r| r.id.as_str())
    }
}

/// Reference to the participant this user gives a gift to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
}

/// How much the owner wants a wishlist item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Priority::High),
            "Medium" => Ok(Priority::Medium),
            "Low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A stored wishlist entry. Items are never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub priority: Priority,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Body of an add-item request; the server assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWishlistItem {
    pub title: String,
    pub priority: Priority,
    pub description: String,
    pub links: Vec<String>,
}

/// Read-only projection of another participant and their wishlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientView {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub code_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "wishlists", default)]
    pub wishlist: Vec<WishlistItem>,
}

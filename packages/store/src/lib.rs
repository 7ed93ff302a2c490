//! # Store crate: session state, data model and client configuration
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire types: profiles, wishlist items, recipient projections |
//! | [`session`] | [`SessionStore`], the observable single writer of auth state, and the [`KeyValueStore`] trait |
//! | [`config`] | [`ClientConfig`] parsed from `secret-santa.toml` |
//!
//! Durable backends: [`MemoryStore`] everywhere, [`FileStore`] on native
//! targets, `LocalStorageStore` in the browser (`web` feature).

pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::{ApiConfig, ClientConfig, EventCalendar};
pub use models::{NewWishlistItem, Priority, RecipientRef, RecipientView, UserProfile, WishlistItem};
pub use session::{KeyValueStore, Session, SessionStore, Subscription, TOKEN_KEY, USER_KEY};

//! # Browser `localStorage` key/value store
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the web platform. It
//! talks to `window.localStorage` through `web-sys`, which is synchronous, so it
//! fits the session store's synchronous trait directly.
//!
//! Every call looks the storage object up again; there is nothing to cache
//! across calls and the lookup is cheap. When storage is unavailable (private
//! browsing, disabled cookies) reads return `None` and writes are dropped with a
//! warning.

use web_sys::Storage;

use crate::session::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!(key, "localStorage unavailable, entry not persisted");
            return;
        };
        if storage.set_item(key, value).is_err() {
            tracing::warn!(key, "localStorage rejected write");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                tracing::warn!(key, "localStorage rejected removal");
            }
        }
    }
}

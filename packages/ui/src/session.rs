//! Platform session storage.
//!
//! Returns a [`store::SessionStore`] backed by the appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via `store::LocalStorageStore`
//! - **Native**: one file per key under `<data_dir>/secret-santa/` via `store::FileStore`
//! - anything else keeps the session in memory for the lifetime of the page

/// Restore the session persisted on this platform.
pub fn make_session_store() -> store::SessionStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::SessionStore::restore(store::LocalStorageStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("secret-santa");
        store::SessionStore::restore(store::FileStore::new(base))
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::SessionStore::restore(store::MemoryStore::new())
    }
}

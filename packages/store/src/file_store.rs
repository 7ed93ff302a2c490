//! # Filesystem-backed key/value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used on native targets. Each key is a
//! file inside the base directory whose content is the raw value:
//!
//! ```text
//! <base_dir>/
//! ├── secret-santa-login-token
//! └── secret-santa-user-data
//! ```
//!
//! Use [`dirs::data_dir()`](https://docs.rs/dirs) to obtain a platform-appropriate
//! base such as `~/.local/share/secret-santa/`.
//!
//! I/O failures are logged and otherwise ignored, so an unwritable directory
//! degrades to "nothing persisted" instead of breaking the session.

use std::path::PathBuf;

use crate::session::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            tracing::warn!(dir = %self.base.display(), "cannot create store directory: {e}");
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            tracing::warn!(key, "cannot persist entry: {e}");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.entry_path(key);
        if path.exists() {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(key, "cannot remove entry: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::session::{SessionStore, TOKEN_KEY};

    #[test]
    fn test_entries_survive_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("secret-santa");

        let store = FileStore::new(base.clone());
        assert!(store.get(TOKEN_KEY).is_none());
        store.set(TOKEN_KEY, "tok-1");

        let reopened = FileStore::new(base);
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("tok-1"));

        reopened.remove(TOKEN_KEY);
        reopened.remove(TOKEN_KEY);
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_session_roundtrip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let user = UserProfile {
            user_id: "u1".to_string(),
            code_name: "alice".to_string(),
            name: "Alice".to_string(),
            has_picked: false,
            recipient: None,
        };

        SessionStore::restore(FileStore::new(dir.path().to_path_buf())).sign_in("tok-1", user.clone());

        let restored = SessionStore::restore(FileStore::new(dir.path().to_path_buf()));
        assert_eq!(restored.token().as_deref(), Some("tok-1"));
        assert_eq!(restored.user(), Some(user));
    }
}

//! # Session store: the single writer of authentication state
//!
//! [`SessionStore`] owns the signed-in [`Session`] and mirrors it into a durable
//! [`KeyValueStore`] under two fixed keys, so a reload restores the session
//! without asking for credentials again:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] | the bearer token, verbatim |
//! | [`USER_KEY`] | the [`UserProfile`] serialised as JSON |
//!
//! Views never mutate authentication state themselves. They call the store and
//! learn about changes through [`SessionStore::subscribe`]; every mutation is
//! persisted first and then announced to each observer exactly once.
//!
//! The handle is `Rc`-based and meant for a single-threaded event loop. Clones
//! share the same state. Two browser tabs writing the same storage are not
//! reconciled: the last writer wins.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::UserProfile;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "secret-santa-login-token";
/// Storage key holding the serialised profile.
pub const USER_KEY: &str = "secret-santa-user-data";

/// Synchronous string key/value persistence (browser `localStorage`, a
/// directory of files, or memory).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Authentication state as seen by the views.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn signed_in(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn logged_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Observer = Rc<dyn Fn(&Session)>;

/// Durable, observable session state.
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    current: Rc<RefCell<Session>>,
    observers: Rc<RefCell<Vec<(Subscription, Observer)>>>,
    next_id: Rc<Cell<u64>>,
}

impl SessionStore {
    /// Load whatever session the storage holds.
    ///
    /// A token without a readable profile is discarded: the authenticated views
    /// cannot render without one.
    pub fn restore(storage: impl KeyValueStore + 'static) -> Self {
        let storage: Rc<dyn KeyValueStore> = Rc::new(storage);
        let session = match storage.get(TOKEN_KEY) {
            None => Session::default(),
            Some(token) => {
                let user = storage
                    .get(USER_KEY)
                    .and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
                        Ok(user) => Some(user),
                        Err(e) => {
                            tracing::warn!("discarding unreadable stored profile: {e}");
                            None
                        }
                    });
                match user {
                    Some(user) => Session::signed_in(token, user),
                    None => {
                        storage.remove(TOKEN_KEY);
                        storage.remove(USER_KEY);
                        Session::default()
                    }
                }
            }
        };

        Self {
            storage,
            current: Rc::new(RefCell::new(session)),
            observers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.current.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.current.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.current.borrow().user.clone()
    }

    /// Replace the session. A session without a token clears everything.
    ///
    /// When the incoming profile belongs to the user already signed in, it is
    /// merged with [`UserProfile::absorb`] so `has_picked` can never regress.
    pub fn set_session(&self, session: Session) {
        let Some(token) = session.token else {
            self.clear();
            return;
        };

        let user = {
            let current = self.current.borrow();
            match (current.user.clone(), session.user) {
                (Some(mut cached), Some(incoming)) if cached.user_id == incoming.user_id => {
                    cached.absorb(incoming);
                    Some(cached)
                }
                (_, incoming) => incoming,
            }
        };

        self.storage.set(TOKEN_KEY, &token);
        match &user {
            Some(user) => self.persist_user(user),
            None => self.storage.remove(USER_KEY),
        }
        *self.current.borrow_mut() = Session {
            token: Some(token),
            user,
        };
        self.notify();
    }

    /// Start a fresh session from a login or registration response.
    pub fn sign_in(&self, token: impl Into<String>, user: UserProfile) {
        tracing::info!(code_name = %user.code_name, "signed in");
        self.clear_silently();
        self.set_session(Session::signed_in(token, user));
    }

    /// Merge a profile-affecting response into the signed-in user.
    /// Ignored when nobody is signed in or the profile belongs to someone else.
    pub fn update_user(&self, user: UserProfile) {
        let merged = {
            let current = self.current.borrow();
            if current.token.is_none() {
                return;
            }
            match current.user.clone() {
                Some(mut cached) if cached.user_id == user.user_id => {
                    cached.absorb(user);
                    cached
                }
                Some(cached) => {
                    tracing::warn!(
                        signed_in = %cached.user_id,
                        incoming = %user.user_id,
                        "ignoring profile update for another user"
                    );
                    return;
                }
                None => user,
            }
        };

        self.persist_user(&merged);
        self.current.borrow_mut().user = Some(merged);
        self.notify();
    }

    /// Forget the session and its persisted copy.
    pub fn clear(&self) {
        if self.current.borrow().logged_in() {
            tracing::info!("session cleared");
        }
        self.clear_silently();
        self.notify();
    }

    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    fn clear_silently(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        *self.current.borrow_mut() = Session::default();
    }

    fn persist_user(&self, user: &UserProfile) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(e) => tracing::error!("failed to serialise profile: {e}"),
        }
    }

    fn notify(&self) {
        // Observers may subscribe or read the session while being called.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        let session = self.session();
        for observer in observers {
            observer(&session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::RecipientRef;

    fn alice() -> UserProfile {
        UserProfile {
            user_id: "u1".to_string(),
            code_name: "alice".to_string(),
            name: "Alice".to_string(),
            has_picked: false,
            recipient: None,
        }
    }

    #[test]
    fn test_restore_empty() {
        let store = SessionStore::restore(MemoryStore::new());
        assert!(!store.session().logged_in());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_sign_in_persists_exact_payload() {
        let backend = MemoryStore::new();
        let store = SessionStore::restore(backend.clone());

        store.sign_in("tok-1", alice());

        assert_eq!(backend.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        let stored: UserProfile = serde_json::from_str(&backend.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, alice());

        // A reload sees the same session.
        let reloaded = SessionStore::restore(backend);
        assert_eq!(reloaded.session(), Session::signed_in("tok-1", alice()));
    }

    #[test]
    fn test_restore_discards_token_without_profile() {
        let backend = MemoryStore::new();
        backend.set(TOKEN_KEY, "tok-1");
        backend.set(USER_KEY, "{not json");

        let store = SessionStore::restore(backend.clone());
        assert!(!store.session().logged_in());
        assert!(backend.get(TOKEN_KEY).is_none());
        assert!(backend.get(USER_KEY).is_none());
    }

    #[test]
    fn test_set_session_without_token_clears() {
        let backend = MemoryStore::new();
        let store = SessionStore::restore(backend.clone());
        store.sign_in("tok-1", alice());

        store.set_session(Session {
            token: None,
            user: Some(alice()),
        });

        assert_eq!(store.session(), Session::default());
        assert!(backend.get(TOKEN_KEY).is_none());
        assert!(backend.get(USER_KEY).is_none());
    }

    #[test]
    fn test_has_picked_is_monotonic() {
        let store = SessionStore::restore(MemoryStore::new());
        store.sign_in("tok-1", alice());

        let mut picked = alice();
        picked.has_picked = true;
        picked.recipient = Some(RecipientRef {
            id: "r1".to_string(),
        });
        store.update_user(picked);
        assert!(store.user().unwrap().has_picked);

        // Neither a stale update nor a stale full session can undo the pick.
        store.update_user(alice());
        assert!(store.user().unwrap().has_picked);
        store.set_session(Session::signed_in("tok-1", alice()));
        let user = store.user().unwrap();
        assert!(user.has_picked);
        assert_eq!(user.recipient_id(), Some("r1"));

        // Only a full clear resets it.
        store.clear();
        assert!(store.user().is_none());
    }

    #[test]
    fn test_update_user_ignored_when_signed_out() {
        let store = SessionStore::restore(MemoryStore::new());
        store.update_user(alice());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_update_user_ignores_other_users() {
        let store = SessionStore::restore(MemoryStore::new());
        store.sign_in("tok-1", alice());

        let mut mallory = alice();
        mallory.user_id = "u2".to_string();
        mallory.code_name = "mallory".to_string();
        store.update_user(mallory);

        assert_eq!(store.user().unwrap().code_name, "alice");
    }

    #[test]
    fn test_observers_see_every_change_once() {
        let store = SessionStore::restore(MemoryStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sub = {
            let seen = seen.clone();
            store.subscribe(move |session| seen.borrow_mut().push(session.logged_in()))
        };

        store.sign_in("tok-1", alice());
        store.clear();
        assert_eq!(*seen.borrow(), vec![true, false]);

        store.unsubscribe(sub);
        store.sign_in("tok-2", alice());
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::restore(MemoryStore::new());
        let other = store.clone();
        store.sign_in("tok-1", alice());
        assert_eq!(other.token().as_deref(), Some("tok-1"));
    }
}

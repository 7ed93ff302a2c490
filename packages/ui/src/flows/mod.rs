//! # Flows: what the views do, without the views
//!
//! Each submodule holds the validation rules, state machines and async
//! operations behind one area of the app. They are generic over
//! [`api::Backend`] and take the [`SessionStore`] explicitly, so every rule can
//! be exercised without a renderer.
//!
//! | Module | Covers |
//! |--------|--------|
//! | [`auth`] | login, registration, forgot password, change password |
//! | [`pick`] | the one-shot participant pick and the recipient lookup |
//! | [`wishlist`] | the draft builder, local list state, add/remove |
//!
//! ## Error policy
//!
//! Every operation reports a [`FlowError`]. Validation problems stay per field
//! and never reach the network. A server message is shown verbatim; anything
//! else gets the operation's generic fallback. An auth failure on a call that
//! carried the token clears the session ([`settle`]); the routing shell notices
//! and sends the user back to the entry point. This applies to every
//! authenticated call alike.

use std::collections::BTreeMap;

use api::ApiError;
use chrono::NaiveDate;
use store::SessionStore;

pub mod auth;
pub mod pick;
pub mod wishlist;

#[cfg(test)]
pub(crate) mod testing;

/// Banner shown after the session was invalidated by the server.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

/// Validation messages keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Why a flow did not complete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("invalid input")]
    Invalid(FieldErrors),
    /// The server refused with a message of its own.
    #[error("{0}")]
    Rejected(String),
    /// Network trouble or a refusal without a message.
    #[error("{0}")]
    Failed(String),
    /// A date gate is closed; nothing was sent.
    #[error("{0}")]
    Closed(String),
    #[error("session expired")]
    SessionExpired,
}

impl FlowError {
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        match err.server_message() {
            Some(message) => FlowError::Rejected(message.to_string()),
            None => FlowError::Failed(fallback.to_string()),
        }
    }

    /// Text for the dismissible banner. Field errors render inline instead.
    pub fn banner(&self) -> Option<String> {
        match self {
            FlowError::Invalid(_) => None,
            FlowError::Rejected(message) | FlowError::Failed(message) | FlowError::Closed(message) => {
                Some(message.clone())
            }
            FlowError::SessionExpired => Some(SESSION_EXPIRED.to_string()),
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FlowError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for FlowError {
    fn from(errors: FieldErrors) -> Self {
        FlowError::Invalid(errors)
    }
}

/// Map the result of a token-carrying call, clearing the session on an auth failure.
pub fn settle<T>(
    session: &SessionStore,
    result: Result<T, ApiError>,
    fallback: &str,
) -> Result<T, FlowError> {
    result.map_err(|err| {
        if err.is_auth_failure() {
            tracing::warn!("token rejected, clearing session");
            session.clear();
            FlowError::SessionExpired
        } else {
            FlowError::from_api(err, fallback)
        }
    })
}

/// Lifecycle of a form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed(String),
}

impl SubmitState {
    /// Enter `Submitting`. Refused while a submission is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        *self = SubmitState::Submitting;
        true
    }

    /// Leave `Submitting` according to the flow's result.
    /// Field errors put the form back to `Idle` since they render inline.
    pub fn finish<T>(&mut self, result: &Result<T, FlowError>) {
        *self = match result {
            Ok(_) => SubmitState::Success,
            Err(err) => match err.banner() {
                Some(message) => SubmitState::Failed(message),
                None => SubmitState::Idle,
            },
        };
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SubmitState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{MemoryStore, UserProfile};

    #[test]
    fn test_single_submission_in_flight() {
        let mut state = SubmitState::default();
        assert!(state.begin());
        assert!(!state.begin());

        state.finish::<()>(&Err(FlowError::Failed("nope".to_string())));
        assert_eq!(state.error(), Some("nope"));

        // A failure permits a retry.
        assert!(state.begin());
        state.finish(&Ok(()));
        assert_eq!(state, SubmitState::Success);
    }

    #[test]
    fn test_field_errors_return_to_idle() {
        let mut state = SubmitState::default();
        state.begin();
        let mut errors = FieldErrors::new();
        errors.add("title", "Title is required.");
        state.finish::<()>(&Err(errors.into()));
        assert_eq!(state, SubmitState::Idle);
    }

    #[test]
    fn test_first_field_message_wins() {
        let mut errors = FieldErrors::new();
        errors.add("password", "first");
        errors.add("password", "second");
        assert_eq!(errors.get("password"), Some("first"));
        assert_eq!(errors.get("codeName"), None);
    }

    #[test]
    fn test_server_message_or_fallback() {
        let rejected = FlowError::from_api(
            ApiError::Server {
                status: 400,
                message: Some("Already picked.".to_string()),
            },
            "fallback",
        );
        assert_eq!(rejected.banner().as_deref(), Some("Already picked."));

        let failed = FlowError::from_api(ApiError::Network("refused".to_string()), "fallback");
        assert_eq!(failed.banner().as_deref(), Some("fallback"));
    }

    #[test]
    fn test_settle_clears_session_on_auth_failure() {
        let session = SessionStore::restore(MemoryStore::new());
        session.sign_in(
            "tok-1",
            UserProfile {
                user_id: "u1".to_string(),
                code_name: "alice".to_string(),
                name: "Alice".to_string(),
                has_picked: false,
                recipient: None,
            },
        );

        let kept = settle::<()>(&session, Err(ApiError::Timeout), "fallback");
        assert_eq!(kept, Err(FlowError::Failed("fallback".to_string())));
        assert!(session.session().logged_in());

        let expired = settle::<()>(
            &session,
            Err(ApiError::Server {
                status: 401,
                message: None,
            }),
            "fallback",
        );
        assert_eq!(expired, Err(FlowError::SessionExpired));
        assert!(!session.session().logged_in());
    }
}

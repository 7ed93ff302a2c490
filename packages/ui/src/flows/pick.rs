//! The participant pick: `NotPicked → Picking → Picked`.
//!
//! `Picked` is terminal for the session. A failed request falls back to
//! `NotPicked` so the user can try again; the server decides whether a pick
//! is still allowed.

use api::Backend;
use chrono::NaiveDate;
use store::{EventCalendar, RecipientView, SessionStore, UserProfile};

use super::{settle, FlowError};

pub const PICK_FAILED: &str = "An error occurred while picking a participant.";
pub const RECIPIENT_FAILED: &str = "An error occurred while loading the participant's details.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PickState {
    #[default]
    NotPicked,
    Picking,
    Picked,
}

impl PickState {
    pub fn from_profile(user: Option<&UserProfile>) -> Self {
        match user {
            Some(user) if user.has_picked => PickState::Picked,
            _ => PickState::NotPicked,
        }
    }

    /// Whether the pick control is enabled.
    pub fn can_start(&self, calendar: &EventCalendar, today: NaiveDate) -> bool {
        *self == PickState::NotPicked && calendar.picking_open(today)
    }

    /// `NotPicked → Picking`, if allowed.
    pub fn begin(&mut self, calendar: &EventCalendar, today: NaiveDate) -> bool {
        if !self.can_start(calendar, today) {
            return false;
        }
        *self = PickState::Picking;
        true
    }

    pub fn finish(&mut self, result: &Result<PickOutcome, FlowError>) {
        if *self == PickState::Picked {
            return;
        }
        *self = match result {
            Ok(PickOutcome::Picked(_)) => PickState::Picked,
            _ => PickState::NotPicked,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// Nothing was sent: the window is closed, the pick already happened, or
    /// nobody is signed in.
    Unavailable,
    Picked(RecipientView),
}

/// Ask the server for a recipient and fold the updated profile into the session.
pub async fn pick<B: Backend>(
    backend: &B,
    session: &SessionStore,
    calendar: &EventCalendar,
    today: NaiveDate,
) -> Result<PickOutcome, FlowError> {
    let Some(user) = session.user() else {
        return Ok(PickOutcome::Unavailable);
    };
    if user.has_picked || !calendar.picking_open(today) {
        tracing::debug!(has_picked = user.has_picked, "pick not available");
        return Ok(PickOutcome::Unavailable);
    }

    let response = settle(session, backend.pick(&user.user_id).await, PICK_FAILED)?;
    tracing::info!(recipient = %response.recipient_details.code_name, "picked a participant");
    session.update_user(response.picker_details);
    Ok(PickOutcome::Picked(response.recipient_details))
}

/// Fetch the bound recipient's profile and wishlist. `None` before the pick.
pub async fn load_recipient<B: Backend>(
    backend: &B,
    session: &SessionStore,
) -> Result<Option<RecipientView>, FlowError> {
    let Some(recipient_id) = session
        .user()
        .and_then(|user| user.recipient_id().map(str::to_string))
    else {
        return Ok(None);
    };
    settle(
        session,
        backend.get_user(&recipient_id).await,
        RECIPIENT_FAILED,
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::{alice, FakeBackend};
    use api::{ApiError, CancelScope, Cancelled};
    use store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn signed_in() -> SessionStore {
        let session = SessionStore::restore(MemoryStore::new());
        session.sign_in("tok-1", alice());
        session
    }

    fn open_day() -> NaiveDate {
        date(2023, 11, 10)
    }

    #[tokio::test]
    async fn test_pick_before_window_is_noop() {
        let backend = FakeBackend::new();
        let session = signed_in();
        let calendar = EventCalendar::default();
        let early = date(2023, 11, 9);

        let mut state = PickState::from_profile(session.user().as_ref());
        assert!(!state.can_start(&calendar, early));
        assert!(!state.begin(&calendar, early));
        assert_eq!(state, PickState::NotPicked);

        let outcome = pick(&backend, &session, &calendar, early).await.unwrap();
        assert_eq!(outcome, PickOutcome::Unavailable);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pick_binds_recipient_once() {
        let backend = FakeBackend::new();
        let session = signed_in();
        let calendar = EventCalendar::default();

        let mut state = PickState::from_profile(session.user().as_ref());
        assert!(state.begin(&calendar, open_day()));
        assert_eq!(state, PickState::Picking);
        // No second submission while in flight.
        assert!(!state.begin(&calendar, open_day()));

        let result = pick(&backend, &session, &calendar, open_day()).await;
        state.finish(&result);
        assert_eq!(state, PickState::Picked);
        match result.unwrap() {
            PickOutcome::Picked(recipient) => assert_eq!(recipient.code_name, "bob"),
            other => panic!("unexpected outcome {other:?}"),
        }

        let user = session.user().unwrap();
        assert!(user.has_picked);
        assert_eq!(user.recipient_id(), Some("u2"));

        // Programmatic re-pick is a no-op.
        let again = pick(&backend, &session, &calendar, open_day()).await.unwrap();
        assert_eq!(again, PickOutcome::Unavailable);
        assert_eq!(backend.calls(), vec!["pick"]);

        // Picked is terminal.
        state.finish(&Err(FlowError::Failed(PICK_FAILED.to_string())));
        assert_eq!(state, PickState::Picked);
        assert_eq!(PickState::from_profile(session.user().as_ref()), PickState::Picked);
    }

    #[tokio::test]
    async fn test_failed_pick_can_be_retried() {
        let backend = FakeBackend::new();
        let session = signed_in();
        let calendar = EventCalendar::default();
        let mut state = PickState::NotPicked;

        backend.fail_next(ApiError::Network("offline".to_string()));
        state.begin(&calendar, open_day());
        let result = pick(&backend, &session, &calendar, open_day()).await;
        state.finish(&result);
        assert_eq!(result.unwrap_err().banner().as_deref(), Some(PICK_FAILED));
        assert_eq!(state, PickState::NotPicked);
        assert!(!session.user().unwrap().has_picked);

        assert!(state.begin(&calendar, open_day()));
        let result = pick(&backend, &session, &calendar, open_day()).await;
        state.finish(&result);
        assert_eq!(state, PickState::Picked);
    }

    #[tokio::test]
    async fn test_rejected_token_ends_session() {
        let backend = FakeBackend::new();
        let session = signed_in();

        backend.fail_next(ApiError::Server {
            status: 403,
            message: None,
        });
        let err = pick(&backend, &session, &EventCalendar::default(), open_day())
            .await
            .unwrap_err();
        assert_eq!(err, FlowError::SessionExpired);
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_load_recipient_after_pick() {
        let backend = FakeBackend::new();
        let session = signed_in();

        assert_eq!(load_recipient(&backend, &session).await.unwrap(), None);
        assert!(backend.calls().is_empty());

        pick(&backend, &session, &EventCalendar::default(), open_day())
            .await
            .unwrap();
        let recipient = load_recipient(&backend, &session).await.unwrap().unwrap();
        assert_eq!(recipient.code_name, "bob");
        assert_eq!(recipient.wishlist.len(), 1);
        assert_eq!(backend.calls(), vec!["pick", "get_user"]);
    }

    #[tokio::test]
    async fn test_teardown_after_commit_still_records_pick() {
        let backend = FakeBackend::new();
        let session = signed_in();
        let calendar = EventCalendar::default();
        let scope = CancelScope::new();
        backend.hold_after_commit();

        let picking = scope.run_to_completion(pick(&backend, &session, &calendar, open_day()));
        let teardown = async {
            while backend.calls().is_empty() {
                tokio::task::yield_now().await;
            }
            scope.cancel();
            backend.release();
        };

        let (result, ()) = tokio::join!(picking, teardown);
        assert_eq!(result, Err(Cancelled));
        assert_eq!(backend.calls(), vec!["pick"]);
        let user = session.user().unwrap();
        assert!(user.has_picked);
        assert_eq!(user.recipient_id(), Some("u2"));

        // A later view sees the pick instead of offering it again.
        assert_eq!(PickState::from_profile(session.user().as_ref()), PickState::Picked);
    }
}

//! Account flows: login, registration, forgot password, change password.
//!
//! Every `*Form` validates into the request body it produces. A form that fails
//! validation never reaches the [`Backend`].

use api::{
    Backend, ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use chrono::NaiveDate;
use store::{EventCalendar, SessionStore, UserProfile};

use super::{settle, FieldErrors, FlowError};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const CODE_NAME_MIN_LEN: usize = 4;
pub const NAME_MIN_LEN: usize = 2;

pub const LOGIN_FAILED: &str = "An error occurred during login.";
pub const REGISTRATION_FAILED: &str = "An error occurred during registration.";
pub const PASSWORD_CHANGE_FAILED: &str = "An error occurred while changing your password";
pub const PASSWORD_CHANGED: &str = "Password changed successfully.";
pub const PASSWORD_RESET_CLOSED: &str = "Contact the developer for assistance.";

const CODE_NAME_REQUIRED: &str = "Code name is required.";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters.";
const PASSWORDS_DIFFER: &str = "New password and confirm password do not match.";

fn check_password(errors: &mut FieldErrors, field: &'static str, password: &str) {
    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.add(field, PASSWORD_TOO_SHORT);
    }
}

fn check_new_password(errors: &mut FieldErrors, new_password: &str, confirm_password: &str) {
    check_password(errors, "newPassword", new_password);
    check_password(errors, "confirmPassword", confirm_password);
    if new_password != confirm_password {
        errors.add("confirmPassword", PASSWORDS_DIFFER);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub code_name: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let code_name = self.code_name.trim();
        let mut errors = FieldErrors::new();
        if code_name.is_empty() {
            errors.add("codeName", CODE_NAME_REQUIRED);
        }
        check_password(&mut errors, "password", &self.password);
        errors.into_result(|| LoginRequest {
            code_name: code_name.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub code_name: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let name = self.name.trim();
        let code_name = self.code_name.trim();
        let mut errors = FieldErrors::new();
        if name.chars().count() < NAME_MIN_LEN {
            errors.add("name", "Name must be at least 2 characters.");
        }
        if code_name.chars().count() < CODE_NAME_MIN_LEN {
            errors.add("codeName", "Code name must be at least 4 characters.");
        }
        check_password(&mut errors, "password", &self.password);
        errors.into_result(|| RegisterRequest {
            name: name.to_string(),
            code_name: code_name.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub code_name: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<ResetPasswordRequest, FieldErrors> {
        let code_name = self.code_name.trim();
        let mut errors = FieldErrors::new();
        if code_name.is_empty() {
            errors.add("codeName", CODE_NAME_REQUIRED);
        }
        check_new_password(&mut errors, &self.new_password, &self.confirm_password);
        errors.into_result(|| ResetPasswordRequest {
            code_name: code_name.to_string(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            errors.add("currentPassword", "Current password is required.");
        }
        check_new_password(&mut errors, &self.new_password, &self.confirm_password);
        errors.into_result(|| ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

/// Log in and start a session with exactly what the server returned.
pub async fn login<B: Backend>(
    backend: &B,
    session: &SessionStore,
    form: &LoginForm,
) -> Result<UserProfile, FlowError> {
    let request = form.validate()?;
    let response = backend
        .login(&request)
        .await
        .map_err(|e| FlowError::from_api(e, LOGIN_FAILED))?;
    session.sign_in(response.token, response.user.clone());
    Ok(response.user)
}

/// Register and sign straight in.
pub async fn register<B: Backend>(
    backend: &B,
    session: &SessionStore,
    form: &RegistrationForm,
) -> Result<UserProfile, FlowError> {
    let request = form.validate()?;
    let response = backend
        .register(&request)
        .await
        .map_err(|e| FlowError::from_api(e, REGISTRATION_FAILED))?;
    session.sign_in(response.token, response.user.clone());
    Ok(response.user)
}

/// Reset a forgotten password. Only available until the reset cutoff.
pub async fn reset_password<B: Backend>(
    backend: &B,
    calendar: &EventCalendar,
    today: NaiveDate,
    form: &ForgotPasswordForm,
) -> Result<(), FlowError> {
    if !calendar.password_reset_open(today) {
        return Err(FlowError::Closed(PASSWORD_RESET_CLOSED.to_string()));
    }
    let request = form.validate()?;
    backend
        .reset_password(&request)
        .await
        .map_err(|e| FlowError::from_api(e, PASSWORD_CHANGE_FAILED))
}

/// Change the signed-in user's password.
pub async fn change_password<B: Backend>(
    backend: &B,
    session: &SessionStore,
    form: &ChangePasswordForm,
) -> Result<(), FlowError> {
    let request = form.validate()?;
    if !session.session().logged_in() {
        return Err(FlowError::SessionExpired);
    }
    settle(
        session,
        backend.change_password(&request).await,
        PASSWORD_CHANGE_FAILED,
    )
}

/// Ask the server whether a restored token is still accepted. Only a definite
/// auth failure signs the user out; an unreachable server keeps the cached session.
pub async fn verify_session<B: Backend>(backend: &B, session: &SessionStore) {
    let Some(user) = session.user() else {
        return;
    };
    match backend.get_user(&user.user_id).await {
        Ok(_) => tracing::debug!(user = %user.code_name, "stored token accepted"),
        Err(err) if err.is_auth_failure() => {
            tracing::info!(user = %user.code_name, "stored token rejected, signing out");
            session.clear();
        }
        Err(err) => tracing::warn!(%err, "could not verify stored token, keeping cached session"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::testing::{alice, FakeBackend};
    use api::ApiError;
    use store::{MemoryStore, Session};

    fn session() -> SessionStore {
        SessionStore::restore(MemoryStore::new())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_short_password_never_reaches_network() {
        let backend = FakeBackend::new();
        let session = session();
        let form = LoginForm {
            code_name: "alice".to_string(),
            password: "short".to_string(),
        };

        let err = login(&backend, &session, &form).await.unwrap_err();
        let errors = err.field_errors().unwrap();
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 8 characters.")
        );
        assert!(backend.calls().is_empty());
        assert!(!session.session().logged_in());
    }

    #[tokio::test]
    async fn test_invalid_registration_never_reaches_network() {
        let backend = FakeBackend::new();
        let cases = [
            ("A", "alice", "long-enough", "name"),
            ("Alice", "ali", "long-enough", "codeName"),
            ("Alice", "alice", "1234567", "password"),
            ("  A ", "  ali  ", "long-enough", "codeName"),
        ];
        for (name, code_name, password, field) in cases {
            let form = RegistrationForm {
                name: name.to_string(),
                code_name: code_name.to_string(),
                password: password.to_string(),
            };
            let err = register(&backend, &session(), &form).await.unwrap_err();
            assert!(
                err.field_errors().unwrap().get(field).is_some(),
                "expected {field} error for {form:?}"
            );
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_login_persists_server_payload() {
        let backend = FakeBackend::new();
        let storage = MemoryStore::new();
        let session = SessionStore::restore(storage.clone());
        let form = LoginForm {
            code_name: " alice ".to_string(),
            password: "correct-horse".to_string(),
        };

        let user = login(&backend, &session, &form).await.unwrap();

        assert_eq!(user, alice());
        assert_eq!(session.session(), Session::signed_in("tok-alice", alice()));
        // The persisted copy matches too.
        let reloaded = SessionStore::restore(storage);
        assert_eq!(reloaded.session(), Session::signed_in("tok-alice", alice()));
        assert_eq!(backend.calls(), vec!["login"]);
    }

    #[tokio::test]
    async fn test_registration_signs_in() {
        let backend = FakeBackend::new();
        let session = session();
        let form = RegistrationForm {
            name: "Carol".to_string(),
            code_name: "carol".to_string(),
            password: "correct-horse".to_string(),
        };

        let user = register(&backend, &session, &form).await.unwrap();
        assert_eq!(user.code_name, "carol");
        assert_eq!(session.token().as_deref(), Some("tok-carol"));
    }

    #[tokio::test]
    async fn test_login_errors() {
        let backend = FakeBackend::new();
        let session = session();
        let form = LoginForm {
            code_name: "alice".to_string(),
            password: "correct-horse".to_string(),
        };

        // Wrong credentials: a 401 on login is just a rejection.
        backend.fail_next(ApiError::Server {
            status: 401,
            message: Some("Invalid code name or password.".to_string()),
        });
        let err = login(&backend, &session, &form).await.unwrap_err();
        assert_eq!(
            err,
            FlowError::Rejected("Invalid code name or password.".to_string())
        );

        backend.fail_next(ApiError::Network("offline".to_string()));
        let err = login(&backend, &session, &form).await.unwrap_err();
        assert_eq!(err.banner().as_deref(), Some(LOGIN_FAILED));
        assert!(!session.session().logged_in());

        // Retry succeeds.
        login(&backend, &session, &form).await.unwrap();
        assert!(session.session().logged_in());
    }

    #[tokio::test]
    async fn test_reset_password_is_time_gated() {
        let backend = FakeBackend::new();
        let calendar = EventCalendar::default();
        let form = ForgotPasswordForm {
            code_name: "alice".to_string(),
            new_password: "new-password".to_string(),
            confirm_password: "new-password".to_string(),
        };

        let err = reset_password(&backend, &calendar, date(2023, 11, 28), &form)
            .await
            .unwrap_err();
        assert_eq!(err.banner().as_deref(), Some(PASSWORD_RESET_CLOSED));
        assert!(backend.calls().is_empty());

        reset_password(&backend, &calendar, date(2023, 11, 20), &form)
            .await
            .unwrap();
        assert_eq!(backend.calls(), vec!["reset_password"]);
    }

    #[test]
    fn test_reset_password_mismatch() {
        let form = ForgotPasswordForm {
            code_name: "alice".to_string(),
            new_password: "new-password".to_string(),
            confirm_password: "new-passw0rd".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("confirmPassword"), Some(PASSWORDS_DIFFER));
        assert_eq!(errors.get("newPassword"), None);
    }

    #[tokio::test]
    async fn test_change_password_rejected_token_clears_session() {
        let backend = FakeBackend::new();
        let session = session();
        session.sign_in("tok-1", alice());
        let form = ChangePasswordForm {
            current_password: "old-password".to_string(),
            new_password: "new-password".to_string(),
            confirm_password: "new-password".to_string(),
        };

        change_password(&backend, &session, &form).await.unwrap();

        backend.fail_next(ApiError::Server {
            status: 401,
            message: Some("Token expired.".to_string()),
        });
        let err = change_password(&backend, &session, &form).await.unwrap_err();
        assert_eq!(err, FlowError::SessionExpired);
        assert!(!session.session().logged_in());
    }

    #[tokio::test]
    async fn test_verify_session_keeps_accepted_token() {
        let backend = FakeBackend::new();
        let session = session();
        session.sign_in("tok-1", alice());

        verify_session(&backend, &session).await;
        assert!(session.session().logged_in());
        assert_eq!(backend.calls(), vec!["get_user"]);
    }

    #[tokio::test]
    async fn test_verify_session_clears_rejected_token() {
        let backend = FakeBackend::new();
        let session = session();
        session.sign_in("tok-1", alice());

        backend.fail_next(ApiError::Server {
            status: 401,
            message: Some("Unauthorized".to_string()),
        });
        verify_session(&backend, &session).await;
        assert_eq!(session.session(), Session::default());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_verify_session_keeps_session_when_offline() {
        let backend = FakeBackend::new();
        let session = session();
        session.sign_in("tok-1", alice());

        backend.fail_next(ApiError::Network("offline".to_string()));
        verify_session(&backend, &session).await;
        assert!(session.session().logged_in());
        assert_eq!(session.user(), Some(alice()));
    }

    #[tokio::test]
    async fn test_verify_session_without_user_is_silent() {
        let backend = FakeBackend::new();
        verify_session(&backend, &session()).await;
        assert!(backend.calls().is_empty());
    }
}

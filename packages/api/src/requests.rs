//! Request and response bodies of the Secret Santa API.

use serde::{Deserialize, Serialize};
use store::{RecipientView, UserProfile};

/// Body of `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub code_name: String,
    pub password: String,
}

/// Body of `POST /users/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub code_name: String,
    pub password: String,
}

/// Body of `POST /users/reset-password` (unauthenticated, time-gated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub code_name: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body of `POST /users/change-password` (authenticated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Response of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Response of `POST /users/pick/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PickResponse {
    /// The picker's refreshed profile, now with `hasPicked` and `recipient` set.
    pub picker_details: UserProfile,
    pub recipient_details: RecipientView,
}

//! # HTTP client wrapper
//!
//! [`ApiClient`] is the only place that talks HTTP. It resolves paths against
//! the configured base URL, attaches `Authorization: Bearer <token>` whenever
//! the [`SessionStore`] holds a token, sends JSON bodies, and turns every
//! failure into an [`ApiError`]:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | 2xx | `Ok(response)` |
//! | non-2xx | [`ApiError::Server`] with the `{ message }` body if present |
//! | no response | [`ApiError::Network`] / [`ApiError::Timeout`] |
//! | 2xx with unexpected JSON | [`ApiError::Decode`] |
//!
//! What to do about an auth failure is the caller's decision. The client never
//! touches the session beyond reading the token.

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{NewWishlistItem, RecipientView, SessionStore, WishlistItem};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::requests::{
    AuthResponse, ChangePasswordRequest, LoginRequest, PickResponse, RegisterRequest,
    ResetPasswordRequest,
};

/// Cheap-to-clone handle on the remote API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Absolute URL for an API path such as `/users/login`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and classify the outcome.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, path, "sending request");
        let response = request.send().await.map_err(|e| {
            let err = ApiError::from_transport(e);
            tracing::warn!(%method, path, "request failed: {err}");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status, &body);
        tracing::warn!(%method, path, status = status.as_u16(), "request rejected: {err}");
        Err(err)
    }

    async fn fetch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        self.request(method, path, body)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_only<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        self.request(method, path, body).await.map(|_| ())
    }
}

impl Backend for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch_json(Method::POST, "/users/login", Some(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch_json(Method::POST, "/users/register", Some(request))
            .await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.send_only(Method::POST, "/users/reset-password", Some(request))
            .await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.send_only(Method::POST, "/users/change-password", Some(request))
            .await
    }

    async fn get_user(&self, user_id: &str) -> Result<RecipientView, ApiError> {
        self.fetch_json::<_, ()>(Method::GET, &format!("/users/{user_id}"), None)
            .await
    }

    async fn pick(&self, user_id: &str) -> Result<PickResponse, ApiError> {
        self.fetch_json::<_, ()>(Method::POST, &format!("/users/pick/{user_id}"), None)
            .await
    }

    async fn get_wishlist(&self, user_id: &str) -> Result<Vec<WishlistItem>, ApiError> {
        self.fetch_json::<_, ()>(Method::GET, &format!("/users/{user_id}/wishlist"), None)
            .await
    }

    async fn add_wishlist_item(
        &self,
        user_id: &str,
        item: &NewWishlistItem,
    ) -> Result<WishlistItem, ApiError> {
        self.fetch_json(
            Method::POST,
            &format!("/users/add-wishlist/{user_id}"),
            Some(item),
        )
        .await
    }

    async fn delete_wishlist_item(&self, user_id: &str, item_id: &str) -> Result<(), ApiError> {
        self.send_only::<()>(
            Method::DELETE,
            &format!("/users/delete-wishlist/{user_id}/{item_id}"),
            None,
        )
        .await
    }
}

//! The seam between the views and the remote API.
//!
//! Flows in the `ui` crate are generic over [`Backend`] so they can be driven
//! by [`ApiClient`](crate::ApiClient) in the app and by a fake in tests.

use std::future::Future;

use store::{NewWishlistItem, RecipientView, WishlistItem};

use crate::error::ApiError;
use crate::requests::{
    AuthResponse, ChangePasswordRequest, LoginRequest, PickResponse, RegisterRequest,
    ResetPasswordRequest,
};

/// One method per endpoint the client consumes.
pub trait Backend {
    /// `POST /users/login`
    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `POST /users/register`
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `POST /users/reset-password`
    fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> impl Future<Output = Result<(), ApiError>>;

    /// `POST /users/change-password`
    fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> impl Future<Output = Result<(), ApiError>>;

    /// `GET /users/:id`
    fn get_user(&self, user_id: &str) -> impl Future<Output = Result<RecipientView, ApiError>>;

    /// `POST /users/pick/:id`
    fn pick(&self, user_id: &str) -> impl Future<Output = Result<PickResponse, ApiError>>;

    /// `GET /users/:id/wishlist`
    fn get_wishlist(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<WishlistItem>, ApiError>>;

    /// `POST /users/add-wishlist/:id`
    fn add_wishlist_item(
        &self,
        user_id: &str,
        item: &NewWishlistItem,
    ) -> impl Future<Output = Result<WishlistItem, ApiError>>;

    /// `DELETE /users/delete-wishlist/:userId/:itemId`
    fn delete_wishlist_item(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;
}

//! # API crate: everything between the views and the Secret Santa server
//!
//! The server owns the shuffle, persistence and password checks. This crate
//! only knows how to reach it and how to report on the attempt.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token from the [`store::SessionStore`], JSON bodies, response classification |
//! | [`backend`] | [`Backend`]: one async method per endpoint, the seam the `ui` flows are generic over |
//! | [`error`] | [`ApiError`]: network, timeout, server (status + message) and decode failures |
//! | [`requests`] | Request and response bodies |
//! | [`watchdog`] | [`Watchdog`]: advisory "taking longer than usual" timer around any future |
//! | [`cancel`] | [`CancelScope`]: aborts a view's in-flight requests when the view goes away |
//!
//! ## Endpoints
//!
//! - **Accounts**: `POST /users/login`, `POST /users/register`, `POST /users/reset-password`,
//!   `POST /users/change-password`, `GET /users/:id`
//! - **Pick**: `POST /users/pick/:id`
//! - **Wishlist**: `GET /users/:id/wishlist`, `POST /users/add-wishlist/:id`,
//!   `DELETE /users/delete-wishlist/:userId/:itemId`

pub mod backend;
pub mod cancel;
pub mod client;
pub mod error;
pub mod requests;
pub mod watchdog;

pub use backend::Backend;
pub use cancel::{CancelScope, Cancelled};
pub use client::ApiClient;
pub use error::ApiError;
pub use requests::{
    AuthResponse, ChangePasswordRequest, LoginRequest, PickResponse, RegisterRequest,
    ResetPasswordRequest,
};
pub use watchdog::Watchdog;

pub use reqwest::Url;

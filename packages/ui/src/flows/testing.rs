//! In-memory [`Backend`] for flow tests. Records every call so tests can
//! assert that nothing reached the network.

use std::cell::{Cell, RefCell};

use api::{
    ApiError, AuthResponse, Backend, ChangePasswordRequest, LoginRequest, PickResponse,
    RegisterRequest, ResetPasswordRequest,
};
use store::{NewWishlistItem, RecipientRef, RecipientView, UserProfile, WishlistItem};

pub(crate) fn alice() -> UserProfile {
    UserProfile {
        user_id: "u1".to_string(),
        code_name: "alice".to_string(),
        name: "Alice".to_string(),
        has_picked: false,
        recipient: None,
    }
}

pub(crate) fn bob_view() -> RecipientView {
    RecipientView {
        id: "u2".to_string(),
        code_name: "bob".to_string(),
        name: "Bob".to_string(),
        wishlist: vec![WishlistItem {
            id: "b1".to_string(),
            title: "Board game".to_string(),
            priority: store::Priority::Medium,
            description: String::new(),
            links: Vec::new(),
        }],
    }
}

#[derive(Default)]
pub(crate) struct FakeBackend {
    calls: RefCell<Vec<&'static str>>,
    /// When set, the next call fails with this error instead of succeeding.
    fail_next: RefCell<Option<ApiError>>,
    wishlist: RefCell<Vec<WishlistItem>>,
    next_id: Cell<u32>,
    /// While set, committing calls wait before answering.
    holding: Cell<bool>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    pub fn seed_wishlist(&self, items: Vec<WishlistItem>) {
        *self.wishlist.borrow_mut() = items;
    }

    /// Make `pick` and `add_wishlist_item` commit server-side, then stall
    /// until [`FakeBackend::release`].
    pub fn hold_after_commit(&self) {
        self.holding.set(true);
    }

    pub fn release(&self) {
        self.holding.set(false);
    }

    async fn respond(&self) {
        while self.holding.get() {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, call: &'static str) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Backend for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.record("login")?;
        Ok(AuthResponse {
            token: format!("tok-{}", request.code_name),
            user: alice(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.record("register")?;
        Ok(AuthResponse {
            token: format!("tok-{}", request.code_name),
            user: UserProfile {
                code_name: request.code_name.clone(),
                name: request.name.clone(),
                ..alice()
            },
        })
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.record("reset_password")
    }

    async fn change_password(&self, _request: &ChangePasswordRequest) -> Result<(), ApiError> {
        self.record("change_password")
    }

    async fn get_user(&self, _user_id: &str) -> Result<RecipientView, ApiError> {
        self.record("get_user")?;
        Ok(bob_view())
    }

    async fn pick(&self, user_id: &str) -> Result<PickResponse, ApiError> {
        self.record("pick")?;
        self.respond().await;
        Ok(PickResponse {
            picker_details: UserProfile {
                user_id: user_id.to_string(),
                has_picked: true,
                recipient: Some(RecipientRef {
                    id: "u2".to_string(),
                }),
                ..alice()
            },
            recipient_details: RecipientView {
                wishlist: Vec::new(),
                ..bob_view()
            },
        })
    }

    async fn get_wishlist(&self, _user_id: &str) -> Result<Vec<WishlistItem>, ApiError> {
        self.record("get_wishlist")?;
        Ok(self.wishlist.borrow().clone())
    }

    async fn add_wishlist_item(
        &self,
        _user_id: &str,
        item: &NewWishlistItem,
    ) -> Result<WishlistItem, ApiError> {
        self.record("add_wishlist_item")?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let created = WishlistItem {
            id: format!("w{id}"),
            title: item.title.clone(),
            priority: item.priority,
            description: item.description.clone(),
            links: item.links.clone(),
        };
        self.wishlist.borrow_mut().push(created.clone());
        self.respond().await;
        Ok(created)
    }

    async fn delete_wishlist_item(&self, _user_id: &str, item_id: &str) -> Result<(), ApiError> {
        self.record("delete_wishlist_item")?;
        self.wishlist.borrow_mut().retain(|item| item.id != item_id);
        Ok(())
    }
}

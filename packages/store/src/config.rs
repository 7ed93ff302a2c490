//! # Client configuration: `secret-santa.toml`
//!
//! The web entry point embeds this file at build time. It tells the client where
//! the API lives, how long a request may take before the UI apologises for the
//! wait, and the calendar of the event.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"
//! slow_request_threshold_ms = 5000
//!
//! [event]
//! title = "Group Study"
//! pick_opens = "2023-11-10"
//! password_reset_closes = "2023-11-28"
//! wishlist_closes = "2023-12-15"
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`ApiConfig`] | Base URL and the slow-request threshold shared by every flow. |
//! | [`EventCalendar`] | The date gates for picking, password resets and wishlist edits. |
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `secret-santa.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub event: EventCalendar,
}

/// Remote API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// After this long without a response the UI shows a "taking longer than usual" notice.
    #[serde(default = "default_slow_request_threshold")]
    pub slow_request_threshold_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_slow_request_threshold() -> u64 {
    5000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            slow_request_threshold_ms: default_slow_request_threshold(),
        }
    }
}

/// Event title and the fixed dates that open or close parts of the app.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventCalendar {
    #[serde(default = "default_title")]
    pub title: String,
    /// Picking is allowed on and after this date.
    #[serde(default = "default_pick_opens")]
    pub pick_opens: NaiveDate,
    /// The forgot-password form disappears on this date.
    #[serde(default = "default_password_reset_closes")]
    pub password_reset_closes: NaiveDate,
    /// Adding wishlist items stops on this date. Removal stays possible.
    #[serde(default = "default_wishlist_closes")]
    pub wishlist_closes: NaiveDate,
}

fn default_title() -> String {
    "Group Study".to_string()
}

fn default_pick_opens() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 10).unwrap_or_default()
}

fn default_password_reset_closes() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 11, 28).unwrap_or_default()
}

fn default_wishlist_closes() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 15).unwrap_or_default()
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self {
            title: default_title(),
            pick_opens: default_pick_opens(),
            password_reset_closes: default_password_reset_closes(),
            wishlist_closes: default_wishlist_closes(),
        }
    }
}

impl EventCalendar {
    pub fn picking_open(&self, today: NaiveDate) -> bool {
        today >= self.pick_opens
    }

    pub fn password_reset_open(&self, today: NaiveDate) -> bool {
        today < self.password_reset_closes
    }

    pub fn wishlist_open(&self, today: NaiveDate) -> bool {
        today < self.wishlist_closes
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "secret-santa.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to point the client at another API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.api.slow_request_threshold_ms)
    }
}

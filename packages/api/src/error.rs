//! Error taxonomy for calls to the Secret Santa API.

use reqwest::StatusCode;
use serde::Deserialize;

/// Why a request did not produce the expected payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No response at all: connection refused, DNS failure, CORS rejection.
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    /// The server answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build a [`ApiError::Server`] from a non-2xx status and its raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// Classify a transport-level failure (no usable response).
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// The token was rejected or lacks permission.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Server { status: 401 | 403, .. })
    }

    /// The structured `{ "message": ... }` the server sent, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

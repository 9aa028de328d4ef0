//! Failure taxonomy for gateway calls.

use thiserror::Error;

/// Message raised to callers after a 401 cleared the session.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Fallback when an error body carries neither `message` nor `error`.
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport unreachable, refused, or timed out. Never retried.
    #[error("{0}")]
    Network(String),

    /// Non-success status other than 401.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The backend answered 401; the session has already been cleared.
    #[error("Session expired. Please login again.")]
    AuthExpired,

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// The response body was not the JSON the caller expected.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::AuthExpired => Some(401),
            _ => None,
        }
    }
}

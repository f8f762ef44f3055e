//! Client error model.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type used across the client layer.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error taxonomy for everything the client can surface.
///
/// Keep this focused on what a caller can act on: inline field errors,
/// access states, transient failures. Recovery (token refresh) is the HTTP
/// client's job and never leaks here as a distinct variant; a request that
/// exhausted its one refresh-and-retry attempt surfaces as `Unauthorized`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// A value failed client-side validation; no request was issued.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Server-side validation errors keyed by field name.
    #[error("validation failed for {} field(s)", .0.len())]
    FieldErrors(BTreeMap<String, String>),

    /// Authorization failure after the refresh-and-retry cycle ran (or could
    /// not run). The session has already been torn down when this is returned.
    #[error("unauthorized")]
    Unauthorized,

    /// Permission denial for this specific operation. Never a logout.
    #[error("access denied: {0}")]
    Forbidden(String),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate email reported by the backend).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Server-side failure (5xx).
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Token persistence failed (file store I/O).
    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this error means the session tokens are invalid.
    ///
    /// Identity-fetch failures use this to distinguish "clear the session"
    /// from transient errors that must not log the user out.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Error for a single field, if this error carries exactly one.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        match self {
            ClientError::FieldErrors(map) => map.get(field).map(String::as_str),
            _ => None,
        }
    }
}

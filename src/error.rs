//! Client Error Types
//!
//! This module defines the error taxonomy for the backend access layer.
//! The request executor converts every failure into one of these before
//! folding it into the uniform result envelope, so no raw transport error
//! ever reaches a consumer.
//!
//! # Error Categories
//!
//! - `Transport` - network-level failures (unreachable host, DNS, TLS)
//! - `Timeout` - the per-request cancellation timer fired
//! - `Status` - the backend answered outside the 2xx range
//! - `Decode` - the response body was not the expected JSON shape
//! - `Failed` - a call already reported failure through its envelope
//! - `Unauthorized` - an operation requiring a session ran without one
//! - `Validation` - a local check rejected the input before any network call
//!
//! # Thread Safety
//!
//! All variants are `Send + Sync` and can cross task boundaries.

use thiserror::Error;

/// Errors produced by the backend access layer.
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    /// Network-level failure before any HTTP status was received
    #[error("Network error: {0}")]
    Transport(String),

    /// The cancellation timer aborted the in-flight request
    #[error("Request aborted: timed out after {0} ms")]
    Timeout(u64),

    /// The backend answered with a non-success HTTP status
    #[error("HTTP error: {status} - {text}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical status text
        text: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A call reported failure through its result envelope
    #[error("Request failed: {0}")]
    Failed(String),

    /// The operation requires an authenticated session
    #[error("Not authenticated")]
    Unauthorized,

    /// Local input validation rejected the request before it was sent
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl ApiError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(format!("JSON error: {}", err))
    }
}

//! Error types for the CRUD client.
//!
//! # Design
//! Every variant becomes a `Failure` outcome at the call site, with the
//! `Display` text as its reason. The texts are user-visible, so `HttpStatus`
//! renders exactly as `HTTP {status}: {status_text}` and `Transport` renders
//! the underlying fault verbatim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A response arrived but its status was outside 200..=299.
    #[error("HTTP {status}: {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// The call never produced a response (DNS, refused connection, ...).
    #[error("{0}")]
    Transport(String),

    /// A precondition failed before any request was issued.
    #[error("{0}")]
    Guard(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    pub fn invalid_integer(field: &str, value: &str) -> Self {
        ApiError::Guard(format!("invalid integer for {field}: {value:?}"))
    }
}

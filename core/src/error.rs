//! Error types for the SaludRural client.
//!
//! # Design
//! `Http.detail` is resolved by the transport wrapper: it carries the
//! server's `detail` message when the error body had one, otherwise the
//! generic `Error {status}` text, so `Display` shows exactly what the
//! backend wanted the caller to see. `NotFound` gets a dedicated variant
//! because callers frequently distinguish "the record does not exist" from
//! "the request went wrong."

use thiserror::Error;

/// Errors returned by the transport wrapper and the resource clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx, non-204 status.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// A referenced record does not exist (e.g. canceling an unknown
    /// appointment in the local backend).
    #[error("resource not found")]
    NotFound,

    /// The HTTP round-trip itself failed (connect, DNS, socket).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The payload is missing a field the selected backend requires.
    #[error("validation failed: {0}")]
    Validation(String),
}

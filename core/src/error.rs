//! Error types for the Biblia client.
//!
//! # Design
//! The client adds no context of its own: a failed GET surfaces as the
//! `TransportError` the transport produced, and a body that does not match the
//! expected shape surfaces as the `serde_json::Error` that rejected it. HTTP
//! status codes are never inspected, so a bad API key shows up as whatever the
//! remote error payload fails to deserialize into.

use crate::transport::TransportError;

/// Errors returned by `BibliaClient` and `Biblia`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The outbound request could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Query options could not be flattened into scalar key/value pairs.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("unknown translation: {0}")]
    UnknownTranslation(String),

    /// A required configuration value is absent.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, ApiError>;

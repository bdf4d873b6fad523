//! The HTTP-fetch capability the async client is built on.
//!
//! # Design
//! `Transport` is the only seam between the client and the network: perform a
//! GET on a URL and hand back status and body text, or fail. Connection
//! pooling, timeouts and cancellation belong to the implementation. Failures
//! are reported as `TransportError` and forwarded to the caller unchanged.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{HttpRequest, HttpResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// DNS, TLS or connection failure.
    Connect,
    Timeout,
    /// The connection succeeded but the body could not be read.
    Body,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Body => "body",
            TransportErrorKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// The outbound request could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport error ({kind}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Performs a single GET. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request).await
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;

    use super::{Transport, TransportError, TransportErrorKind};
    use crate::http::{HttpRequest, HttpResponse};

    /// `Transport` backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Use a preconfigured client, e.g. one with a timeout or proxy.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl From<reqwest::Error> for TransportError {
        fn from(err: reqwest::Error) -> Self {
            let kind = if err.is_timeout() {
                TransportErrorKind::Timeout
            } else if err.is_connect() || err.is_request() {
                TransportErrorKind::Connect
            } else if err.is_body() || err.is_decode() {
                TransportErrorKind::Body
            } else {
                TransportErrorKind::Other
            };
            TransportError::new(kind, err.to_string())
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let response = self.client.get(&request.url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        }
    }
}

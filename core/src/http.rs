//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! `BibliaClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without ever touching the network; a `Transport` (or the caller directly)
//! performs the actual GET.
//!
//! Every Biblia endpoint is a GET with all parameters in the query string, so
//! a request is fully described by its URL.

/// An outbound GET described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// An HTTP response described as plain data.
///
/// `status` is informational. The client never maps it to an error; the body
/// is handed to the JSON layer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

//! Typed client for the Biblia Bible-text web API.
//!
//! # Overview
//! Builds GET requests for the bible listing, passage content, reference
//! parsing, text scanning, reference comparison and search endpoints, and
//! deserializes their JSON bodies into typed results.
//!
//! # Design
//! - `BibliaClient` is I/O-free: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse` (host-does-IO pattern).
//! - `Biblia` wraps a `BibliaClient` and a `Transport` into async methods, one
//!   request per call. `ReqwestTransport` is the default transport behind the
//!   `reqwest` feature.
//! - Options are encoded as `&key=value&` per entry, the separator pattern the
//!   remote API and its fixtures expect.
//! - Errors pass through unchanged; HTTP status codes are not interpreted.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
mod query;
pub mod transport;
pub mod types;

pub use api::Biblia;
pub use client::{bible_names, BibliaClient};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpRequest, HttpResponse};
pub use query::encode_component;
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{Transport, TransportError, TransportErrorKind};
pub use types::*;

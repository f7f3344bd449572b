//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds [`HttpRequest`] values and parses [`HttpResponse`] values
//! without ever touching the network — the host supplies an
//! [`HttpTransport`] that executes the actual I/O, one request at a time.
//! This keeps the core deterministic and easy to test with scripted
//! transports.
//!
//! All fields use owned types (`String`, `Vec`) so request values can be
//! recorded, replayed, and compared freely in tests.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// An HTTP request described as plain data.
///
/// Built by `OrderingClient::build_*` methods; executed by the host's
/// [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by the host's [`HttpTransport`], then handed to
/// `OrderingClient::parse_*` methods for status checking and
/// deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The host's side of the I/O boundary: execute one request to completion.
///
/// Implementations must return non-2xx responses as values — status
/// interpretation belongs to the client's `parse_*` methods. Only failures
/// that produced no HTTP response at all (connection refused, timeout)
/// become [`ApiError::Transport`]. The submission protocol calls `send`
/// strictly sequentially, so one request is in flight at a time.
pub trait HttpTransport {
    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

//! Error types for the ordering client.
//!
//! # Design
//! The gateway never lets a failure escape as anything but an [`ApiError`]
//! value — transport faults, unexpected statuses, and codec failures all
//! land in the same enum, so callers handle one shape. Validation failures
//! carry the exact text shown to the diner and never reach the network.

use thiserror::Error;

/// Errors returned by the API gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the order, cafe, or item does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-expected status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The transport could not complete the round-trip at all.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Local precondition failures, surfaced verbatim to the diner. Checked
/// before any network call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Pick a table first")]
    NoTable,

    #[error("Enter your name")]
    NoName,
}

/// Errors from the order submission protocol.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A submission is already running; the new attempt was refused before
    /// touching the cart or the network.
    #[error("an order submission is already in progress")]
    InFlight,
}

/// Errors from the persistence adapter's `save` path. `load` never returns
/// an error — a missing or unreadable snapshot is simply absent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

//! Client core for the tableside restaurant ordering service.
//!
//! # Overview
//! Diners pick a table, identify themselves, build a cart from the menu,
//! and submit it as a backend order. This crate owns the cart state
//! machine, its persistence across page loads, and the multi-request
//! submission protocol. It builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern): the host supplies an [`HttpTransport`], making the core fully
//! deterministic and testable.
//!
//! # Design
//! - [`CartState`] is mutated only through its reducer; transitions are
//!   synchronous, total, and free of I/O.
//! - [`Cart`] pairs the state with a [`CartStore`] and persists a snapshot
//!   after every action; restore discards stale (already-placed) records.
//! - [`OrderingClient`] is stateless (base URL and cafe id only), with
//!   each operation split into `build_*` / `parse_*` so the I/O boundary
//!   is explicit.
//! - [`Submitter`] runs the submission sequence with an in-flight guard;
//!   the ticket id is recorded on first assignment so retries never create
//!   a duplicate backend order.

pub mod cart;
pub mod client;
pub mod error;
pub mod http;
pub mod storage;
pub mod submit;
pub mod types;

pub use cart::{Cart, CartAction, CartState};
pub use client::OrderingClient;
pub use error::{ApiError, StoreError, SubmitError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use storage::{CartStore, FileStore, MemoryStore, CART_FILE};
pub use submit::{Submitter, PLACED_RESET_DELAY};
pub use types::{
    categories, AddOrderItemRequest, CartLine, CartSnapshot, MenuItem, SaveCommentRequest,
    StartOrderRequest, Table,
};

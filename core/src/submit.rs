//! Order submission protocol: turn a built cart into a placed backend order.
//!
//! # Design
//! Submission is a fixed sequence — validate locally, open the ticket if
//! none exists, send each line item one at a time, attach the comment —
//! with the first failure aborting the rest. Already-sent lines stay on the
//! backend; there is no compensating rollback. The ticket id is recorded
//! the moment it is assigned, so retrying the whole submission never
//! creates a second ticket. A busy flag refuses overlapping invocations.

use std::time::Duration;

use tracing::info;

use crate::cart::{Cart, CartAction};
use crate::client::OrderingClient;
use crate::error::{SubmitError, ValidationError};
use crate::http::HttpTransport;
use crate::storage::CartStore;
use crate::types::{AddOrderItemRequest, CartLine, SaveCommentRequest, StartOrderRequest};

/// How long the host shows the success acknowledgement before dispatching
/// `ResetCart` and closing the order review. The core has no clock; the
/// host owns the timer.
pub const PLACED_RESET_DELAY: Duration = Duration::from_millis(2500);

/// Drives submissions and refuses overlap: a second `submit` or
/// `open_ticket` while one is running gets [`SubmitError::InFlight`]
/// without touching the cart or the network.
#[derive(Debug, Default)]
pub struct Submitter {
    in_flight: bool,
}

impl Submitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit the whole cart. On success the cart is placed; the host shows
    /// its acknowledgement and resets after [`PLACED_RESET_DELAY`].
    pub fn submit<S, T>(
        &mut self,
        cart: &mut Cart<S>,
        client: &OrderingClient,
        transport: &mut T,
    ) -> Result<(), SubmitError>
    where
        S: CartStore,
        T: HttpTransport,
    {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }
        self.in_flight = true;
        let result = run_submission(cart, client, transport);
        self.in_flight = false;
        result
    }

    /// Open the backend ticket eagerly, before any items exist — the path
    /// taken when the diner picks a table and enters a name up front.
    ///
    /// Idempotent: a cart that already has a ticket gets the existing id
    /// back without a network call. Lazy creation inside [`Self::submit`]
    /// remains the fallback for carts built without an open ticket.
    pub fn open_ticket<S, T>(
        &mut self,
        cart: &mut Cart<S>,
        client: &OrderingClient,
        transport: &mut T,
        table_id: i64,
        customer_name: &str,
    ) -> Result<i64, SubmitError>
    where
        S: CartStore,
        T: HttpTransport,
    {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }
        self.in_flight = true;
        let result = run_open_ticket(cart, client, transport, table_id, customer_name);
        self.in_flight = false;
        result
    }
}

fn run_submission<S, T>(
    cart: &mut Cart<S>,
    client: &OrderingClient,
    transport: &mut T,
) -> Result<(), SubmitError>
where
    S: CartStore,
    T: HttpTransport,
{
    // Preconditions, in order, each a hard stop before any network traffic.
    if cart.state().items.is_empty() {
        return Err(ValidationError::EmptyCart.into());
    }
    let Some(table_id) = cart.state().table_id else {
        return Err(ValidationError::NoTable.into());
    };
    let customer_name = cart.state().customer_name.trim().to_string();
    if customer_name.is_empty() {
        return Err(ValidationError::NoName.into());
    }

    // Open the ticket once per cart lifecycle. Recording the id before the
    // line items go out means a retry after partial failure skips this step.
    let order_id = match cart.state().order_id {
        Some(id) => id,
        None => {
            let comment = cart.state().comment.clone();
            let id = client.start_order(
                transport,
                &StartOrderRequest {
                    table_id,
                    customer_name,
                    comment: if comment.is_empty() { None } else { Some(comment) },
                },
            )?;
            cart.dispatch(CartAction::SetOrderId(id));
            info!(order_id = id, table_id, "ticket opened");
            id
        }
    };

    // One line at a time, in cart order. The first failure aborts the rest;
    // lines already sent stay on the backend.
    for request in line_requests(order_id, client.cafe_id(), &cart.state().items) {
        client.add_item(transport, &request)?;
    }

    if !cart.state().comment.trim().is_empty() {
        client.save_comment(
            transport,
            &SaveCommentRequest {
                order_id,
                comment: cart.state().comment.clone(),
            },
        )?;
    }

    cart.dispatch(CartAction::PlaceOrder);
    info!(order_id, total = %cart.state().total(), "order placed");
    Ok(())
}

fn run_open_ticket<S, T>(
    cart: &mut Cart<S>,
    client: &OrderingClient,
    transport: &mut T,
    table_id: i64,
    customer_name: &str,
) -> Result<i64, SubmitError>
where
    S: CartStore,
    T: HttpTransport,
{
    let customer_name = customer_name.trim();
    if customer_name.is_empty() {
        return Err(ValidationError::NoName.into());
    }
    if let Some(id) = cart.state().order_id {
        return Ok(id);
    }

    let id = client.start_order(
        transport,
        &StartOrderRequest {
            table_id,
            customer_name: customer_name.to_string(),
            comment: None,
        },
    )?;
    cart.dispatch(CartAction::SetOrderId(id));
    cart.dispatch(CartAction::SetTableId(table_id));
    cart.dispatch(CartAction::SetCustomerName(customer_name.to_string()));
    info!(order_id = id, table_id, "ticket opened");
    Ok(id)
}

/// Map cart lines onto the per-line wire DTOs.
fn line_requests(order_id: i64, cafe_id: i64, items: &[CartLine]) -> Vec<AddOrderItemRequest> {
    items
        .iter()
        .map(|line| AddOrderItemRequest {
            order_id,
            cafe_id,
            item_id: line.item.id,
            quantity: line.quantity,
        })
        .collect()
}

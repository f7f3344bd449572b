//! The cart state machine: authoritative in-memory order state.
//!
//! # Design
//! [`CartState::apply`] is the reducer — synchronous, total, and free of
//! I/O. Invalid inputs are clamped or ignored (a quantity update to zero
//! removes the line), so no action can leave the cart inconsistent.
//! [`Cart`] wraps the state together with a [`CartStore`] and writes a
//! snapshot through after every dispatched action; hosts construct it
//! explicitly and pass it down rather than reaching for globals.

use rust_decimal::Decimal;
use tracing::warn;

use crate::storage::CartStore;
use crate::types::{CartLine, CartSnapshot, MenuItem};

/// Everything the client knows about the order being built.
///
/// Mutated exclusively through [`CartState::apply`]. `order_id` is assigned
/// once the backend ticket exists and survives failed submissions, so a
/// retry never creates a second ticket. `is_order_placed` is monotonic:
/// once set, only `ResetCart` returns the cart to service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub order_id: Option<i64>,
    pub table_id: Option<i64>,
    pub customer_name: String,
    pub items: Vec<CartLine>,
    pub comment: String,
    pub is_order_placed: bool,
}

/// The complete transition set. Every cart mutation goes through one of
/// these.
#[derive(Debug, Clone)]
pub enum CartAction {
    SetOrderId(i64),
    SetTableId(i64),
    SetCustomerName(String),
    AddItem(MenuItem),
    RemoveItem(i64),
    UpdateQuantity { item_id: i64, quantity: i64 },
    SetComment(String),
    PlaceOrder,
    ResetCart,
}

impl CartState {
    /// Apply one transition. Total: never fails, never panics.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::SetOrderId(id) => self.order_id = Some(id),
            CartAction::SetTableId(id) => self.table_id = Some(id),
            CartAction::SetCustomerName(name) => self.customer_name = name,

            CartAction::AddItem(item) => {
                if let Some(line) = self.items.iter_mut().find(|l| l.item.id == item.id) {
                    line.quantity = line.quantity.saturating_add(1);
                } else {
                    self.items.push(CartLine { item, quantity: 1 });
                }
            }

            CartAction::RemoveItem(id) => self.items.retain(|l| l.item.id != id),

            CartAction::UpdateQuantity { item_id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|l| l.item.id != item_id);
                } else if let Some(line) = self.items.iter_mut().find(|l| l.item.id == item_id) {
                    line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
            }

            CartAction::SetComment(text) => self.comment = text,
            CartAction::PlaceOrder => self.is_order_placed = true,
            CartAction::ResetCart => *self = CartState::default(),
        }
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|l| l.item.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Total unit count across lines (the cart badge number).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// The projection written to durable storage.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            table_id: self.table_id,
            items: self.items.clone(),
            comment: self.comment.clone(),
            is_order_placed: self.is_order_placed,
        }
    }

    /// Rebuild state from a persisted snapshot, re-establishing the cart
    /// invariants: duplicate item ids collapse to the first occurrence and
    /// zero-quantity lines are dropped.
    fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let mut items: Vec<CartLine> = Vec::with_capacity(snapshot.items.len());
        for line in snapshot.items {
            if line.quantity == 0 {
                continue;
            }
            if items.iter().any(|l| l.item.id == line.item.id) {
                continue;
            }
            items.push(line);
        }
        CartState {
            order_id: None,
            table_id: snapshot.table_id,
            customer_name: String::new(),
            items,
            comment: snapshot.comment,
            is_order_placed: false,
        }
    }
}

/// The cart plus its persistence adapter. Every dispatched action is
/// written through to the store; save failures are logged and swallowed —
/// persistence is best-effort and never disturbs the diner.
#[derive(Debug)]
pub struct Cart<S: CartStore> {
    state: CartState,
    store: S,
}

impl<S: CartStore> Cart<S> {
    /// A fresh, empty cart.
    pub fn new(store: S) -> Self {
        Self {
            state: CartState::default(),
            store,
        }
    }

    /// Restore the cart persisted by a previous session, if any.
    ///
    /// A snapshot of an already-placed order is stale and discarded — it
    /// must not resurrect as an editable cart.
    pub fn restore(mut store: S) -> Self {
        let state = match store.load() {
            Some(snapshot) if snapshot.is_order_placed => {
                warn!("discarding persisted snapshot of an already-placed order");
                CartState::default()
            }
            Some(snapshot) => CartState::from_snapshot(snapshot),
            None => CartState::default(),
        };
        Self { state, store }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply a transition and write the new snapshot through to the store.
    pub fn dispatch(&mut self, action: CartAction) {
        self.state.apply(action);
        if let Err(err) = self.store.save(&self.state.snapshot()) {
            warn!(%err, "cart snapshot save failed");
        }
    }
}

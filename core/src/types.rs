//! Domain types and wire DTOs for the table-ordering API.
//!
//! # Design
//! These types mirror the backend's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift. Field names
//! are camelCase on the wire, matching the backend contract. Prices use
//! [`Decimal`] so cart totals are exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A table the diner can pick when opening a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: i64,
    pub label: String,
}

/// A catalog entry from the cafe's menu. Immutable once fetched; the cart
/// only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One cart line: a menu item plus how many of it the diner wants.
///
/// Quantity is always at least 1 — transitions that would drop it to 0
/// remove the line instead. Serialized flattened (item fields and
/// `quantity` at the same level), the shape the persisted record uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

/// The cart projection written to durable storage.
///
/// Every field defaults on parse so a partial record still restores; a
/// record that fails to parse entirely is treated as absent by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CartSnapshot {
    pub table_id: Option<i64>,
    pub items: Vec<CartLine>,
    pub comment: String,
    pub is_order_placed: bool,
}

/// Request payload for opening a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StartOrderRequest {
    pub table_id: i64,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request payload for adding one line item to an open ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddOrderItemRequest {
    pub order_id: i64,
    pub cafe_id: i64,
    pub item_id: i64,
    pub quantity: u32,
}

/// Request payload for attaching special instructions to an open ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveCommentRequest {
    pub order_id: i64,
    pub comment: String,
}

/// Unique category names across a menu, sorted for display grouping.
pub fn categories(items: &[MenuItem]) -> Vec<String> {
    let mut names: Vec<String> = items.iter().map(|i| i.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

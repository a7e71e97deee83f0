//! Cart documents: one per buyer.

use crate::model::{Batch, BatchId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A buyer's pending selection of one batch.
///
/// `unit_price` and `available_quantity` are snapshots taken when the line was added; the
/// stock may have moved on by checkout, which is why order placement re-reads the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(rename = "id")]
    pub batch_id: BatchId,
    pub variety: String,
    #[serde(rename = "pricePerKg")]
    pub unit_price: f64,
    #[serde(rename = "quantity")]
    pub available_quantity: u32,
    pub selected_quantity: u32,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Snapshots `batch` with the buyer's chosen quantity.
    pub fn from_batch(batch: &Batch, selected_quantity: u32) -> Self {
        Self {
            batch_id: batch.batch_id.clone(),
            variety: batch.variety.clone(),
            unit_price: batch.price_per_kg,
            available_quantity: batch.quantity,
            selected_quantity,
            added_at: Utc::now(),
        }
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.selected_quantity)
    }
}

/// The cart document. Lines are keyed by batch id and kept in insertion order.
///
/// # Actor Store
/// Managed by the cart actor, see [`crate::cart_actor`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub buyer_id: UserId,
    pub items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new(buyer_id: UserId) -> Self {
        Self {
            buyer_id,
            items: Vec::new(),
        }
    }
}

/// Payload for creating an empty cart.
#[derive(Debug, Clone)]
pub struct CartCreate {
    pub buyer_id: UserId,
}

/// Result of adding a line: the line as stored and whether it merged into an existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub item: CartLineItem,
    pub merged: bool,
}

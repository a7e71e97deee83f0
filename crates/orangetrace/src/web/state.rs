//! Shared handler state.

use crate::clients::{BatchClient, CartClient, OrderClient};
use crate::lifecycle::MarketSystem;
use chrono::FixedOffset;

/// Clients handed to every handler. Cloning is cheap: each client is a channel sender.
#[derive(Clone)]
pub struct AppState {
    pub batches: BatchClient,
    pub carts: CartClient,
    pub orders: OrderClient,
    /// Offset tracking timelines are shown in.
    pub tracking_offset: FixedOffset,
}

impl AppState {
    pub fn new(system: &MarketSystem, tracking_offset: FixedOffset) -> Self {
        Self {
            batches: system.batch_client.clone(),
            carts: system.cart_client.clone(),
            orders: system.order_client.clone(),
            tracking_offset,
        }
    }
}

//! Custom actions for the Cart actor.
//!
//! These act on an existing cart. Adding a line may have to create the cart first, so it
//! runs as a transaction instead (see [`CartClient::add_item`](crate::clients::CartClient::add_item)).

use crate::model::{BatchId, CartLineItem};

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Sets the selected quantity of one line.
    ///
    /// # Errors
    /// Fails if the line is missing or the quantity is outside `1..=available`.
    UpdateQuantity { batch_id: BatchId, quantity: u32 },
    /// Removes one line. Removing a missing line is not an error.
    RemoveItem(BatchId),
    /// Removes every line.
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    /// The line after the change.
    UpdateQuantity(CartLineItem),
    /// Whether a line was removed.
    RemoveItem(bool),
    /// The lines that were in the cart.
    Clear(Vec<CartLineItem>),
}

//! Error types for the Order actor.

use crate::batch_actor::InventoryError;
use crate::cart_actor::CartError;
use crate::model::{OrderId, OrderStatus};
use actor_store::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order belongs to a different buyer.
    #[error("Order {0} belongs to another buyer")]
    Forbidden(OrderId),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The status change would move the order backwards or out of a final state.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The inventory decrement (or its compensation) failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Clearing the buyer's cart failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(OrderId(id)),
            other => other
                .downcast_entity::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

//! Error types for the Cart actor.

use crate::model::BatchId;
use actor_store::FrameworkError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart has no line for this batch.
    #[error("Cart item not found: {0}")]
    ItemNotFound(BatchId),

    /// The selected quantity is outside `1..=available`.
    #[error("Quantity {requested} for {batch_id} must be between 1 and {available}")]
    QuantityOutOfRange {
        batch_id: BatchId,
        requested: u32,
        available: u32,
    },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        e.downcast_entity::<CartError>()
            .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string()))
    }
}

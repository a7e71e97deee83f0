//! Error types for the Batch actor.

use crate::model::BatchId;
use actor_store::FrameworkError;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// No batch is registered under this id.
    #[error("Batch {0} not found")]
    BatchNotFound(BatchId),

    /// The batch holds less than the requested quantity.
    #[error("Insufficient stock for {batch_id}: requested {requested}, available {available}")]
    InsufficientStock {
        batch_id: BatchId,
        requested: u32,
        available: u32,
    },

    /// A batch with this id is already registered.
    #[error("Batch {0} is already registered")]
    AlreadyRegistered(BatchId),

    /// The requester does not own the batch.
    #[error("Batch {0} belongs to another farmer")]
    Forbidden(BatchId),

    /// The batch data provided is invalid.
    #[error("Batch validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for InventoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => InventoryError::BatchNotFound(BatchId(id)),
            FrameworkError::AlreadyExists(id) => InventoryError::AlreadyRegistered(BatchId(id)),
            other => other
                .downcast_entity::<InventoryError>()
                .unwrap_or_else(|e| InventoryError::ActorCommunicationError(e.to_string())),
        }
    }
}

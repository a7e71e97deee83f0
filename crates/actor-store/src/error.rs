//! # Store Errors
//!
//! Errors raised by the store itself, independent of any entity type.

/// Errors that can occur within the actor store.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the original error unchanged when it is not an entity error of type `E`.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn downcast_recovers_typed_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_leaves_other_errors_alone() {
        let err = FrameworkError::NotFound("batch_1".to_string());
        let back = err.downcast_entity::<OutOfStock>().unwrap_err();
        assert!(matches!(back, FrameworkError::NotFound(id) if id == "batch_1"));

        let foreign = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = foreign.downcast_entity::<OutOfStock>().unwrap_err();
        assert!(back.to_string().contains("disk"));
    }
}

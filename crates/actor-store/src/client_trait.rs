//! # ActorClient Trait
//!
//! Common interface for collection-specific clients: default `get`, `list` and `delete`
//! methods built on top of the wrapped `ResourceClient`, with errors converted into the
//! collection's own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for collection-specific clients to inherit the standard read/delete operations.
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct CartClient {
///     inner: ResourceClient<Cart>,
/// }
///
/// impl ActorClient<Cart> for CartClient {
///     type Error = CartError;
///
///     fn inner(&self) -> &ResourceClient<Cart> {
///         &self.inner
///     }
/// }
///
/// // get(), list() and delete() are provided
/// let cart = client.get(buyer_id).await?;
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<FrameworkError> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::Error::from)
    }

    /// Fetch every entity matching `filter`.
    #[tracing::instrument(skip(self, filter))]
    async fn list<F>(&self, filter: F) -> Result<Vec<T>, Self::Error>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::Error::from)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::Error::from)
    }
}

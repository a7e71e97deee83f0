//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored document type (batch, cart, order, …)
//! implements to be managed by a [`ResourceActor`](crate::ResourceActor). It names the id,
//! the create/update DTOs, the custom actions, the injected context and the error type, and it
//! provides the lifecycle hooks the actor calls while serving requests.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. Hooks are **not** called from inside a
//! [`Transaction`](crate::Transaction): transactions are synchronous read-modify-write units.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can call other actors. The `Context` associated type
/// is injected into every hook when the actor is started with `run(context)`, which lets
/// actors depend on each other's clients without construction-order problems.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier of the entity (order id, batch code, buyer id, …).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Data required to create a new instance.
    type Create: Send + Sync + Debug + 'static;

    /// Data required to update an existing instance.
    type Update: Send + Sync + Debug + 'static;

    /// Resource-specific operations (e.g. `CheckStock`).
    type Action: Send + Sync + Debug + 'static;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// Runtime dependencies injected into the hooks. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error type for this entity.
    ///
    /// One enum per actor rather than one per message. Hook errors are boxed into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) on the way back and
    /// can be recovered with [`FrameworkError::downcast_entity`](crate::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this instance is stored under.
    fn id(&self) -> &Self::Id;

    /// Chooses the id for a create request before the entity is built.
    ///
    /// Natural keys (a batch code, a buyer id) come straight from the payload; generated keys
    /// (order ids) are minted here.
    fn assign_id(params: &Self::Create) -> Self::Id;

    /// Construct the entity from its id and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// An error here means the entity is never inserted.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

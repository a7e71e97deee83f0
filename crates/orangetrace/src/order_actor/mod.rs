//! # Order Actor
//!
//! Order placement and order history.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_store::ActorEntity) implementation for [`Order`], including the placement saga
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The order actor needs the batch and cart clients while placing an order. They are
//! injected when the actor starts:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run((batch_client.clone(), cart_client.clone())));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{BatchClient, CartClient};
use crate::model::Order;
use actor_store::{ResourceActor, ResourceClient};

/// Clients the order actor calls during placement.
pub type OrderContext = (BatchClient, CartClient);

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}

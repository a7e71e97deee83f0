//! # Cart Actor
//!
//! The Cart Store: one [`Cart`] document per buyer holding [`CartLineItem`](crate::model::CartLineItem)s.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_store::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The cart is read and cleared by order placement; see [`crate::order_actor`].

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Cart;
use actor_store::{ResourceActor, ResourceClient};

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}

//! # Domain Model
//!
//! Plain data types for the marketplace documents. Each stored type implements
//! [`ActorEntity`](actor_store::ActorEntity) in its actor module:
//!
//! - [`Batch`] in [`crate::batch_actor`] (the inventory ledger)
//! - [`Cart`] in [`crate::cart_actor`] (one document per buyer)
//! - [`Order`] in [`crate::order_actor`]
//!
//! Wire names follow the web client (`pricePerKg`, `selectedQuantity`, `orderId`, ...), so
//! the same types are serialized straight into HTTP responses.

pub mod batch;
pub mod cart;
pub mod order;

pub use batch::*;
pub use cart::*;
pub use order::*;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for marketplace users, buyers and farmers alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

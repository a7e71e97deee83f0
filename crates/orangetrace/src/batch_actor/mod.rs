//! # Batch Actor
//!
//! The Inventory Ledger: one [`Batch`] document per farmer-registered lot, with its
//! remaining quantity in kilograms.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_store::ActorEntity) implementation for [`Batch`]
//! - [`error`] - [`InventoryError`] type for type-safe error handling
//! - [`actions`] - [`BatchAction`] and [`BatchActionResult`]
//! - [`stock`] - decrement and restock transactions
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Stock movements
//!
//! Decrements are multi-batch transactions, not per-batch actions: an order for two
//! batches either takes stock from both or from neither. Concurrent decrements are ordered
//! by the actor, so a loser always sees the winner's result:
//!
//! ```rust,ignore
//! // NG2024001 holds 5 kg; two buyers race for it.
//! let a = batch_client.decrement_stock(vec![StockLine::new("NG2024001", 5)], None);
//! let b = batch_client.decrement_stock(vec![StockLine::new("NG2024001", 1)], None);
//! // exactly one of them fails with InventoryError::InsufficientStock
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use orangetrace::batch_actor;
//! use orangetrace::clients::BatchClient;
//! use orangetrace::model::{BatchCreate, StockLine, UserId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = batch_actor::new(batch_actor::DEFAULT_BUFFER_SIZE);
//!     let client = BatchClient::new(generic_client);
//!
//!     // Start the actor (no dependencies)
//!     tokio::spawn(actor.run(()));
//!
//!     let form = BatchCreate {
//!         batch_id: "NG2024001".to_string(),
//!         variety: "Nagpur Mandarin".to_string(),
//!         quantity: 5,
//!         price_per_kg: 80.0,
//!         harvest_date: None,
//!         quality_grade: "A".to_string(),
//!         location: "Katol".to_string(),
//!         description: None,
//!     };
//!     let id = client.register_batch(UserId::from("farmer_1"), form).await?;
//!
//!     client.decrement_stock(vec![StockLine::new(id.clone(), 2)], None).await?;
//!     assert_eq!(client.check_stock(id).await?, 3);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod stock;

pub use actions::*;
pub use error::*;

use crate::model::Batch;
use actor_store::{ResourceActor, ResourceClient};

/// Request channel capacity used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Batch actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Batch>, ResourceClient<Batch>) {
    ResourceActor::new(buffer_size)
}

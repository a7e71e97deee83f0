//! # Actor Store
//!
//! Building blocks for a small, concurrent document store: every collection (batches, carts,
//! orders) is owned by one [`ResourceActor`] running in its own Tokio task, and every caller
//! talks to it through a cheap, cloneable [`ResourceClient`].
//!
//! ## Why one actor per collection?
//!
//! - Isolated state: no shared memory and no locks around the collection
//! - Message-passing concurrency between collections
//! - Sequential processing within a collection, which makes every request atomic with respect
//!   to every other request on that collection
//!
//! The last point is what [`Transaction`]s build on. A transaction is a synchronous closure
//! that reads and writes any number of documents of one collection; the actor runs it to
//! completion before looking at the next message, so concurrent transactions are serialized
//! and a failed one leaves nothing behind.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Domain types and their lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing, transactions, idempotency keys
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use actor_store::{ActorEntity, FrameworkError, ResourceActor, Transaction};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Bin {
//!     id: String,
//!     kg: u32,
//! }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum BinError {
//!     #[error("not enough in {0}")]
//!     Short(String),
//!     #[error(transparent)]
//!     Store(#[from] FrameworkError),
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = String;
//!     type Create = (String, u32);
//!     type Update = ();
//!     type Action = ();
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = BinError;
//!
//!     fn id(&self) -> &String { &self.id }
//!     fn assign_id(params: &(String, u32)) -> String { params.0.clone() }
//!     fn from_create_params(id: String, params: (String, u32)) -> Result<Self, BinError> {
//!         Ok(Self { id, kg: params.1 })
//!     }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), BinError> { Ok(()) }
//! }
//!
//! fn take_two(tx: &mut Transaction<'_, Bin>) -> Result<(), BinError> {
//!     for id in ["a", "b"] {
//!         let bin = tx.get_mut(&id.to_string()).ok_or_else(|| BinError::Short(id.into()))?;
//!         bin.kg = bin.kg.checked_sub(2).ok_or_else(|| BinError::Short(id.into()))?;
//!     }
//!     Ok(())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Bin>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(("a".into(), 5)).await.unwrap();
//!     client.create(("b".into(), 1)).await.unwrap();
//!
//!     // "b" is short, so "a" is not touched either.
//!     assert!(client.transact(take_two).await.is_err());
//!     assert_eq!(client.get("a".into()).await.unwrap().unwrap().kg, 5);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time, so
//! an order actor can hold the batch and cart clients without construction-order problems.
//!
//! ## Idempotency
//!
//! [`ResourceClient::transact_once`] tags a transaction with a key. Once a keyed transaction
//! commits, resubmitting the same key returns `Ok(None)` without running the closure. The
//! actor remembers the most recent [`DEFAULT_IDEMPOTENCY_WINDOW`] keys by default.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from queued expectations, and runs
//! submitted transactions against seeded rows. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod transaction;

// Re-export core types for convenience
pub use actor::{ResourceActor, DEFAULT_IDEMPOTENCY_WINDOW};
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use transaction::{Transaction, TxStatus};

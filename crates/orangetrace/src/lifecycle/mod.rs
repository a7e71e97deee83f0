//! # System Lifecycle
//!
//! Starts the three collections, wires the order actor to the batch and cart clients, and
//! shuts everything down again.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (batch_actor, batches) = batch_actor::new(buffer);
//! let (cart_actor, carts) = cart_actor::new(buffer);
//! let (order_actor, orders) = order_actor::new(buffer);
//!
//! tokio::spawn(batch_actor.run(()));
//! tokio::spawn(cart_actor.run(()));
//! tokio::spawn(order_actor.run((batch_client.clone(), cart_client.clone())));
//! ```
//!
//! Dependencies are injected through `run(context)` rather than at construction, so the
//! order actor can be built before the clients it needs exist.
//!
//! ## Shutdown
//!
//! Dropping every client closes the request channels; each actor drains what is queued and
//! exits. The order actor holds clones of the batch and cart clients, so it has to stop
//! first. The dependency graph is acyclic and channel closure is enough:
//! [`MarketSystem::shutdown`] drops all clients and awaits every task.

pub mod market_system;
pub mod seed;

pub use market_system::*;
pub use seed::*;

//! Type-safe wrappers around [`ResourceClient`](actor_store::ResourceClient).
//!
//! Each client implements [`ActorClient`](actor_store::ActorClient) for the shared
//! `get` / `list` / `delete` operations and adds its collection's domain methods.

pub mod batch_client;
pub mod cart_client;
pub mod order_client;

pub use batch_client::*;
pub use cart_client::*;
pub use order_client::*;

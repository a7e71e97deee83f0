//! # OrangeTrace
//!
//! Farm-to-buyer orange marketplace: farmers register harvest batches, buyers fill carts
//! and place orders, and every order can be tracked along a delivery timeline.
//!
//! ## Layers
//!
//! - **[`model`]**: plain data ([`Batch`](model::Batch), [`Cart`](model::Cart),
//!   [`Order`](model::Order)).
//! - **Actors** ([`batch_actor`], [`cart_actor`], [`order_actor`]): one
//!   [`ResourceActor`](actor_store::ResourceActor) per collection. The batch actor is the
//!   inventory ledger; the order actor runs Order Placement in its `on_create` hook.
//! - **[`clients`]**: typed wrappers the rest of the crate talks to.
//! - **[`tracking`]**: the delivery timeline projector.
//! - **[`lifecycle`]**: starts, wires and stops the actors.
//! - **[`web`]**: the HTTP API.
//! - **[`config`]**: environment configuration.
//!
//! ## Order Placement
//!
//! ```text
//! POST /orders
//!   └─ OrderClient::place_order
//!        └─ Order actor on_create
//!             ├─ BatchClient::decrement_stock   (all lines or none, keyed "order:<id>")
//!             ├─ CartClient::clear              (on failure: BatchClient::restock)
//!             └─ store order (status Placed)
//! ```
//!
//! ## Running
//!
//! ```bash
//! SEED_DEMO_DATA=true RUST_LOG=orangetrace=debug cargo run -p orangetrace
//! ```

pub mod batch_actor;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod tracking;
pub mod web;

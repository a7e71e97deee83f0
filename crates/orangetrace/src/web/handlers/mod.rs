//! Route handlers, one module per resource.

pub mod batches;
pub mod cart;
pub mod farmer;
pub mod health;
pub mod inventory;
pub mod orders;

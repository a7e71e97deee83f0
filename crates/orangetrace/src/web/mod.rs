//! # HTTP API
//!
//! JSON over HTTP on top of the actor clients. Callers identify themselves with the
//! `x-user-id` header; `/health` and the batch lookups are public.
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/health` | liveness |
//! | GET, POST, PUT, DELETE | `/cart` | the caller's cart |
//! | GET, POST | `/orders` | order history, Order Placement |
//! | GET | `/orders/:order_id` | one order |
//! | GET | `/orders/:order_id/tracking` | summary and timeline |
//! | POST | `/update-inventory` | Inventory Decrement |
//! | GET, POST | `/batches` | listing, registration |
//! | GET, PATCH | `/batches/:batch_id` | lookup, owner edit |
//! | GET | `/farmer/overview` | the caller's batches and their sales |
//!
//! Failures are returned as `{"error": ..., "code": ...}`, see [`ApiError`].

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use extractors::{IdempotencyKey, UserIdentity};
pub use routes::router;
pub use state::AppState;

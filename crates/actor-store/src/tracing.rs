//! # Tracing Setup
//!
//! Every actor logs its lifecycle (`Actor started`, `Shutdown`) and each request it serves
//! with an `entity_type` field, so a single `EnvFilter` is enough to follow one collection
//! or the whole system.

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used (for example
/// `"orangetrace=info,actor_store=info"`). Calling this twice is harmless: the second
/// initialization is ignored.
///
/// ```ignore
/// setup_tracing("actor_store=debug");
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

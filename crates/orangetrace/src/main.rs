//! OrangeTrace server.
//!
//! Loads configuration, starts the actor system and serves the HTTP API until Ctrl-C.
//! On shutdown the server stops accepting requests first, then every actor is drained.

use actor_store::tracing::setup_tracing;
use orangetrace::config::AppConfig;
use orangetrace::lifecycle::{seed_demo_batches, MarketSystem};
use orangetrace::web::{router, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!(address = %config.bind_address(), "Starting OrangeTrace");

    let system = MarketSystem::start(config.actor_buffer_size, config.idempotency_window);

    if config.seed_demo_data {
        if let Err(e) = seed_demo_batches(&system.batch_client).await {
            error!(error = %e, "Seeding demo batches failed");
        }
    }

    let app = router(AppState::new(&system, config.tracking_offset));
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.bind_address()))?;

    info!("Listening on {}", config.bind_address());

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    system.shutdown().await?;
    served.map_err(|e| e.to_string())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Ctrl-C received, shutting down");
}

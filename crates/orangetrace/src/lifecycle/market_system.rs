use crate::clients::{BatchClient, CartClient, OrderClient};
use crate::{batch_actor, cart_actor, order_actor};
use tracing::{error, info};

/// Runs every marketplace actor and hands out their clients.
///
/// # Example
///
/// ```rust
/// use orangetrace::lifecycle::MarketSystem;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = MarketSystem::start(32, 1024);
///     let listed = system.batch_client.list_available(None).await.map_err(|e| e.to_string())?;
///     assert!(listed.is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct MarketSystem {
    /// Inventory ledger.
    pub batch_client: BatchClient,

    /// One cart per buyer.
    pub cart_client: CartClient,

    /// Order placement and history.
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns the actors. Must be called inside a Tokio runtime.
    ///
    /// `buffer_size` is the request channel capacity of each actor; `idempotency_window`
    /// bounds the committed keys each store remembers. Only the batch store receives keyed
    /// transactions today (stock decrements).
    pub fn start(buffer_size: usize, idempotency_window: usize) -> Self {
        // 1. Create actors (no dependencies)
        let (batch_actor, batch_client) = batch_actor::new(buffer_size);
        let (cart_actor, cart_client) = cart_actor::new(buffer_size);
        let (order_actor, order_client) = order_actor::new(buffer_size);

        let batch_client = BatchClient::new(batch_client);
        let cart_client = CartClient::new(cart_client);
        let order_client = OrderClient::new(order_client);

        // 2. Start actors with injected context
        let batch_handle = tokio::spawn(
            batch_actor
                .with_idempotency_window(idempotency_window)
                .run(()),
        );
        let cart_handle = tokio::spawn(
            cart_actor
                .with_idempotency_window(idempotency_window)
                .run(()),
        );
        let order_handle = tokio::spawn(
            order_actor
                .with_idempotency_window(idempotency_window)
                .run((batch_client.clone(), cart_client.clone())),
        );

        info!(buffer_size, idempotency_window, "Market system started");

        Self {
            batch_client,
            cart_client,
            order_client,
            handles: vec![order_handle, batch_handle, cart_handle],
        }
    }

    /// Drops every client and waits for the actors to finish.
    ///
    /// Fails if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down market system...");

        // Closing the channels ends each actor's receive loop.
        drop(self.order_client);
        drop(self.batch_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Market system shutdown complete.");
        Ok(())
    }
}

use super::handlers::{batches, cart, farmer, health, inventory, orders};
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// The full HTTP surface, traced per request.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/cart",
            get(cart::list_cart)
                .post(cart::add_to_cart)
                .put(cart::update_cart_item)
                .delete(cart::remove_cart_item),
        )
        .route(
            "/orders",
            get(orders::list_orders).post(orders::place_order),
        )
        .route("/orders/:order_id", get(orders::get_order))
        .route("/orders/:order_id/tracking", get(orders::track_order))
        .route("/update-inventory", post(inventory::update_inventory))
        .route(
            "/batches",
            get(batches::list_batches).post(batches::register_batch),
        )
        .route(
            "/batches/:batch_id",
            get(batches::get_batch).patch(batches::update_batch),
        )
        .route("/farmer/overview", get(farmer::farmer_overview))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

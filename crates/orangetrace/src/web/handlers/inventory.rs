//! `/update-inventory`: the standalone Inventory Decrement.
//!
//! Order Placement already decrements stock. This endpoint stays for clients that call it
//! after checkout; with the placed order's id it is answered as a replay and takes nothing.
//!
//! Keys are scoped to the caller: a header key is prefixed with the user id, and an order id
//! is only used once the order is known to belong to the caller.

use crate::clients::DecrementOutcome;
use crate::model::{BatchId, OrderId, StockLine, UserId};
use crate::web::error::ApiError;
use crate::web::extractors::{IdempotencyKey, UserIdentity};
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLine {
    pub id: BatchId,
    pub selected_quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub cart_items: Vec<InventoryLine>,
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

#[derive(Debug, Serialize)]
pub struct UpdateInventoryResponse {
    pub success: bool,
    pub replayed: bool,
}

pub async fn update_inventory(
    State(state): State<AppState>,
    UserIdentity(user): UserIdentity,
    IdempotencyKey(header_key): IdempotencyKey,
    body: Result<Json<UpdateInventoryRequest>, JsonRejection>,
) -> Result<Json<UpdateInventoryResponse>, ApiError> {
    let Json(request) = body?;
    let key = match (header_key, request.order_id) {
        (Some(key), _) => Some(caller_key(&user, &key)),
        (None, Some(order_id)) => {
            let order = state.orders.get_for_buyer(&user, order_id).await?;
            Some(order.id.inventory_key())
        }
        (None, None) => None,
    };
    let lines = request
        .cart_items
        .into_iter()
        .map(|item| StockLine::new(item.id, item.selected_quantity))
        .collect();

    let outcome = state.batches.decrement_stock(lines, key).await?;
    let replayed = outcome == DecrementOutcome::Replayed;
    info!(user_id = %user, replayed, "Inventory update handled");
    Ok(Json(UpdateInventoryResponse {
        success: true,
        replayed,
    }))
}

fn caller_key(user: &UserId, key: &str) -> String {
    format!("client:{user}:{key}")
}

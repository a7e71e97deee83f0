//! `/cart`: the caller's cart.

use crate::model::{BatchId, CartLineItem};
use crate::web::error::ApiError;
use crate::web::extractors::UserIdentity;
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub batch_id: BatchId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub item_id: BatchId,
    pub new_quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCartRequest {
    pub item_id: BatchId,
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub success: bool,
    pub message: &'static str,
    pub item: CartLineItem,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub success: bool,
    pub removed: bool,
}

pub async fn list_cart(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
) -> Result<Json<Vec<CartLineItem>>, ApiError> {
    Ok(Json(state.carts.list_items(buyer).await?))
}

/// Adds a batch to the cart, merging with an existing line for it.
///
/// Price and available stock are read from the ledger, not the request.
pub async fn add_to_cart(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    body: Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartLineResponse>, ApiError> {
    let Json(request) = body?;
    let batch = state.batches.get_batch(request.batch_id).await?;
    if !batch.is_available() {
        return Err(ApiError::validation(format!(
            "Batch {} is not available",
            batch.batch_id
        )));
    }

    let update = state.carts.add_item(buyer, &batch, request.quantity).await?;
    info!(batch_id = %batch.batch_id, merged = update.merged, "Added to cart");
    Ok(Json(CartLineResponse {
        success: true,
        message: if update.merged {
            "Quantity updated"
        } else {
            "Item added"
        },
        item: update.item,
    }))
}

pub async fn update_cart_item(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    body: Result<Json<UpdateCartRequest>, JsonRejection>,
) -> Result<Json<CartLineResponse>, ApiError> {
    let Json(request) = body?;
    let item = state
        .carts
        .update_quantity(buyer, request.item_id, request.new_quantity)
        .await?;
    Ok(Json(CartLineResponse {
        success: true,
        message: "Quantity updated",
        item,
    }))
}

pub async fn remove_cart_item(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    body: Result<Json<RemoveCartRequest>, JsonRejection>,
) -> Result<Json<RemoveResponse>, ApiError> {
    let Json(request) = body?;
    let removed = state.carts.remove_item(buyer, request.item_id).await?;
    Ok(Json(RemoveResponse {
        success: true,
        removed,
    }))
}

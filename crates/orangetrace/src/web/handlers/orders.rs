//! `/orders`: placement, history and tracking.

use crate::model::{
    CartLineItem, DeliveryAddress, Order, OrderCreate, OrderId, PaymentDetails, PaymentMethod,
    PaymentStatus,
};
use crate::tracking::{tracking_details, TrackingDetails};
use crate::web::error::ApiError;
use crate::web::extractors::UserIdentity;
use crate::web::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Checkout payload. Gateway fields keep the names the payment widget produces.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub delivery_address: DeliveryAddress,
    pub cart_items: Vec<CartLineItem>,
    pub total: f64,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, rename = "razorpay_payment_id")]
    pub razorpay_payment_id: Option<String>,
    #[serde(default, rename = "razorpay_order_id")]
    pub razorpay_order_id: Option<String>,
    #[serde(default, rename = "razorpay_signature")]
    pub razorpay_signature: Option<String>,
}

impl PlaceOrderRequest {
    /// Online unless stated otherwise; status follows the method when absent.
    fn payment(&self) -> PaymentDetails {
        let method = self.payment_method.unwrap_or(PaymentMethod::Online);
        let status = self.payment_status.unwrap_or(match method {
            PaymentMethod::Online => PaymentStatus::Completed,
            PaymentMethod::Cod => PaymentStatus::Pending,
        });
        PaymentDetails {
            method,
            status,
            payment_id: self.razorpay_payment_id.clone(),
            gateway_order_id: self.razorpay_order_id.clone(),
            signature: self.razorpay_signature.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: OrderId,
}

/// Order Placement: takes stock, clears the cart and records the order, or does none of it.
pub async fn place_order(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    body: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ApiError> {
    let Json(request) = body?;
    let payment = request.payment();
    let order_id = state
        .orders
        .place_order(OrderCreate {
            buyer_id: buyer,
            delivery_address: request.delivery_address,
            items: request.cart_items,
            total: request.total,
            payment,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(PlaceOrderResponse { order_id })))
}

pub async fn list_orders(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.list_for_buyer(buyer).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state.orders.get_for_buyer(&buyer, order_id.into()).await?;
    Ok(Json(order))
}

/// Summary and five-step timeline, with times in the configured display offset.
pub async fn track_order(
    State(state): State<AppState>,
    UserIdentity(buyer): UserIdentity,
    Path(order_id): Path<String>,
) -> Result<Json<TrackingDetails>, ApiError> {
    let order = state.orders.get_for_buyer(&buyer, order_id.into()).await?;
    Ok(Json(tracking_details(&order, state.tracking_offset)))
}

//! Order documents.

use crate::model::{BatchId, CartLineItem, StockLine, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Idempotency key under which this order's inventory decrement runs.
    pub fn inventory_key(&self) -> String {
        format!("order:{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfillment status. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(alias = "Pending")]
    Placed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Placed → Shipped → Delivered, and Cancelled from Placed or Shipped.
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Placed, Shipped) | (Shipped, Delivered) | (Placed, Cancelled) | (Shipped, Cancelled)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAddress {
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl DeliveryAddress {
    /// Names the first required field that is blank.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("fullName", &self.full_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }

    /// One-line form used on tracking pages.
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {}, {}, {}",
            self.full_name, self.address, self.city, self.state, self.pincode
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Online,
    Cod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
}

/// Payment confirmation as received from the checkout. The gateway fields are carried
/// as-is; their signature is not verified here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl PaymentDetails {
    pub fn online(payment_id: impl Into<String>) -> Self {
        Self {
            method: PaymentMethod::Online,
            status: PaymentStatus::Completed,
            payment_id: Some(payment_id.into()),
            gateway_order_id: None,
            signature: None,
        }
    }

    pub fn cash_on_delivery() -> Self {
        Self {
            method: PaymentMethod::Cod,
            status: PaymentStatus::Pending,
            payment_id: None,
            gateway_order_id: None,
            signature: None,
        }
    }

    /// Checks the confirmation is consistent with its method.
    pub fn check(&self) -> Result<(), String> {
        match self.method {
            PaymentMethod::Online => {
                let has_id = self
                    .payment_id
                    .as_deref()
                    .is_some_and(|id| !id.trim().is_empty());
                if !has_id {
                    return Err("online payment requires a payment id".to_string());
                }
                if self.status != PaymentStatus::Completed {
                    return Err("online payment must be completed".to_string());
                }
            }
            PaymentMethod::Cod => {
                if self.status != PaymentStatus::Pending {
                    return Err("cash on delivery payment must be pending".to_string());
                }
            }
        }
        Ok(())
    }
}

/// A placed order.
///
/// # Actor Store
/// Managed by the order actor, see [`crate::order_actor`]. `items` is a frozen copy of the
/// cart lines at purchase time and never changes afterwards; only `status` moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "orderId")]
    pub id: OrderId,
    #[serde(rename = "userId")]
    pub buyer_id: UserId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<CartLineItem>,
    #[serde(rename = "total")]
    pub total_amount: f64,
    pub delivery_address: DeliveryAddress,
    pub payment_details: PaymentDetails,
}

impl Order {
    /// Creates a `Placed` order stamped with the current time.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            buyer_id: params.buyer_id,
            created_at: Utc::now(),
            status: OrderStatus::Placed,
            items: params.items,
            total_amount: params.total,
            delivery_address: params.delivery_address,
            payment_details: params.payment,
        }
    }

    /// The inventory movement this order stands for.
    pub fn stock_lines(&self) -> Vec<StockLine> {
        self.items
            .iter()
            .map(|item| StockLine::new(item.batch_id.clone(), item.selected_quantity))
            .collect()
    }

    pub fn contains_batch(&self, batch_id: &BatchId) -> bool {
        self.items.iter().any(|item| &item.batch_id == batch_id)
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: UserId,
    pub delivery_address: DeliveryAddress,
    pub items: Vec<CartLineItem>,
    pub total: f64,
    pub payment: PaymentDetails,
}

/// One order line as seen from the selling farmer's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub order_id: OrderId,
    pub batch_id: BatchId,
    pub buyer_id: UserId,
    pub quantity: u32,
    pub price_per_kg: f64,
    pub total_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub status: OrderStatus,
}

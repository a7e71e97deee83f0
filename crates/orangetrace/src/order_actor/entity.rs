//! ActorEntity implementation for the Order domain type.
//!
//! Order placement is a saga driven from the `on_create` hook:
//!
//! 1. decrement inventory for every line, keyed by the order id (all-or-nothing)
//! 2. clear the buyer's cart; on failure restock the lines and give up
//! 3. the actor stores the order only if both steps succeeded
//!
//! An order therefore never exists without its inventory having been taken, and a failed
//! placement leaves stock and cart as they were.

use super::error::OrderError;
use super::OrderContext;
use crate::clients::DecrementOutcome;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use actor_store::ActorEntity;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Allowed gap between the submitted total and the sum of its lines.
const TOTAL_TOLERANCE: f64 = 0.01;

fn validate(params: &OrderCreate) -> Result<(), OrderError> {
    let invalid = |msg: String| Err(OrderError::ValidationError(msg));

    if params.buyer_id.0.trim().is_empty() {
        return invalid("buyer id is required".to_string());
    }
    if let Some(field) = params.delivery_address.missing_field() {
        return invalid(format!("deliveryAddress.{field} is required"));
    }
    if params.items.is_empty() {
        return invalid("order must contain at least one item".to_string());
    }
    for item in &params.items {
        if item.selected_quantity == 0 {
            return invalid(format!("quantity for {} must be at least 1", item.batch_id));
        }
        if !item.unit_price.is_finite() || item.unit_price <= 0.0 {
            return invalid(format!("price for {} must be greater than zero", item.batch_id));
        }
    }
    if !params.total.is_finite() || params.total <= 0.0 {
        return invalid("total must be greater than zero".to_string());
    }
    let expected: f64 = params.items.iter().map(|item| item.line_total()).sum();
    if (expected - params.total).abs() > TOTAL_TOLERANCE {
        return invalid(format!(
            "total {:.2} does not match items total {:.2}",
            params.total, expected
        ));
    }
    params
        .payment
        .check()
        .map_err(OrderError::ValidationError)
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderStatus;
    type Action = ();
    type ActionResult = ();
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Order ids are random UUIDs.
    fn assign_id(_params: &OrderCreate) -> OrderId {
        OrderId::generate()
    }

    /// Validates the request before any stock is touched.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        validate(&params)?;
        Ok(Order::new(id, params))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let (batches, carts) = ctx;
        let lines = self.stock_lines();

        match batches
            .decrement_stock(lines.clone(), Some(self.id.inventory_key()))
            .await?
        {
            DecrementOutcome::Applied(levels) => {
                info!(order_id = %self.id, batches = levels.len(), "Inventory decremented");
            }
            DecrementOutcome::Replayed => {
                warn!(order_id = %self.id, "Inventory decrement already applied");
            }
        }

        if let Err(e) = carts.clear(&self.buyer_id).await {
            warn!(order_id = %self.id, error = %e, "Cart clear failed, restocking");
            if let Err(restock_err) = batches.restock(lines).await {
                error!(
                    order_id = %self.id,
                    error = %restock_err,
                    "Compensating restock failed"
                );
            }
            return Err(e.into());
        }

        info!(order_id = %self.id, buyer_id = %self.buyer_id, "Order placed");
        Ok(())
    }

    /// Moves the order forward. See [`OrderStatus::can_advance_to`].
    async fn on_update(&mut self, next: OrderStatus, _ctx: &OrderContext) -> Result<(), Self::Error> {
        if !self.status.can_advance_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }
}

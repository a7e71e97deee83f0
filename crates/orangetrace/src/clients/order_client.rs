//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//! Placement itself (stock, cart, compensation) runs in the Order actor's `on_create` hook.
use crate::model::{BatchId, Order, OrderCreate, OrderId, OrderStatus, Purchase, UserId};
use crate::order_actor::OrderError;
use actor_store::{ActorClient, ResourceClient};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }
}

impl OrderClient {
    /// Places an order. Returns the new order id once stock is taken and the cart cleared.
    #[instrument(skip(self, params), fields(buyer_id = %params.buyer_id, lines = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending create to order actor");
        let id = self.inner.create(params).await?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    /// The buyer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_buyer(&self, buyer_id: UserId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(move |order: &Order| order.buyer_id == buyer_id)
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// One order, visible only to the buyer who placed it.
    #[instrument(skip(self))]
    pub async fn get_for_buyer(
        &self,
        buyer_id: &UserId,
        order_id: OrderId,
    ) -> Result<Order, OrderError> {
        let order = self
            .get(order_id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
        if &order.buyer_id != buyer_id {
            return Err(OrderError::Forbidden(order_id));
        }
        Ok(order)
    }

    /// Fulfillment hook: moves the order to `next`.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        order_id: OrderId,
        next: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self.inner.update(order_id, next).await?;
        info!(order_id = %order.id, status = %order.status, "Order status changed");
        Ok(order)
    }

    /// Order lines that bought from any of `batch_ids`, newest first.
    #[instrument(skip(self, batch_ids), fields(batches = batch_ids.len()))]
    pub async fn sales_for_batches(
        &self,
        batch_ids: HashSet<BatchId>,
    ) -> Result<Vec<Purchase>, OrderError> {
        let wanted = batch_ids.clone();
        let mut orders = self
            .list(move |order: &Order| wanted.iter().any(|id| order.contains_batch(id)))
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let purchases = orders
            .iter()
            .flat_map(|order| {
                order
                    .items
                    .iter()
                    .filter(|item| batch_ids.contains(&item.batch_id))
                    .map(move |item| Purchase {
                        order_id: order.id.clone(),
                        batch_id: item.batch_id.clone(),
                        buyer_id: order.buyer_id.clone(),
                        quantity: item.selected_quantity,
                        price_per_kg: item.unit_price,
                        total_price: item.line_total(),
                        purchase_date: order.created_at,
                        status: order.status,
                    })
            })
            .collect();
        Ok(purchases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartLineItem, DeliveryAddress, PaymentDetails};
    use actor_store::mock::MockClient;
    use chrono::{Duration, Utc};

    fn order(id: &str, buyer: &str, batch: &str, minutes_ago: i64) -> Order {
        Order {
            id: id.into(),
            buyer_id: buyer.into(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            status: OrderStatus::Placed,
            items: vec![CartLineItem {
                batch_id: batch.into(),
                variety: "Nagpur Mandarin".to_string(),
                unit_price: 80.0,
                available_quantity: 10,
                selected_quantity: 2,
                added_at: Utc::now(),
            }],
            total_amount: 160.0,
            delivery_address: DeliveryAddress {
                full_name: "Asha Patil".to_string(),
                phone: None,
                address: "12 Civil Lines".to_string(),
                city: "Pune".to_string(),
                state: "Maharashtra".to_string(),
                pincode: "411001".to_string(),
            },
            payment_details: PaymentDetails::cash_on_delivery(),
        }
    }

    #[tokio::test]
    async fn test_list_for_buyer_newest_first() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![
            order("old", "buyer_1", "NG2024001", 30),
            order("other", "buyer_2", "NG2024001", 5),
            order("new", "buyer_1", "NG2024001", 1),
        ]);

        let client = OrderClient::new(mock.client());
        let orders = client.list_for_buyer("buyer_1".into()).await.unwrap();
        let ids: Vec<_> = orders.iter().map(|o| o.id.0.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[tokio::test]
    async fn test_get_for_buyer_checks_owner() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get()
            .return_ok(Some(order("o1", "buyer_1", "NG2024001", 0)));
        mock.expect_get().return_ok(None);

        let client = OrderClient::new(mock.client());
        assert_eq!(
            client
                .get_for_buyer(&"buyer_2".into(), "o1".into())
                .await
                .unwrap_err(),
            OrderError::Forbidden("o1".into())
        );
        assert_eq!(
            client
                .get_for_buyer(&"buyer_1".into(), "o2".into())
                .await
                .unwrap_err(),
            OrderError::NotFound("o2".into())
        );
    }

    #[tokio::test]
    async fn test_sales_only_include_requested_batches() {
        let mut mixed = order("o2", "buyer_2", "NG2024001", 1);
        mixed.items.push(CartLineItem {
            batch_id: "NG2024777".into(),
            ..mixed.items[0].clone()
        });

        let mut mock = MockClient::<Order>::new();
        mock.expect_list().return_ok(vec![
            order("o1", "buyer_1", "NG2024001", 10),
            mixed,
            order("o3", "buyer_1", "NG2024555", 2),
        ]);

        let client = OrderClient::new(mock.client());
        let sales = client
            .sales_for_batches(HashSet::from([BatchId::from("NG2024001")]))
            .await
            .unwrap();
        let rows: Vec<_> = sales
            .iter()
            .map(|p| (p.order_id.0.as_str(), p.batch_id.0.as_str()))
            .collect();
        assert_eq!(rows, [("o2", "NG2024001"), ("o1", "NG2024001")]);
        assert_eq!(sales[0].total_price, 160.0);
    }
}

//! # Cart Client
//!
//! Provides a high-level API for interacting with the `Cart` actor.
//! A buyer without a cart document is treated as having an empty cart.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::model::{Batch, BatchId, Cart, CartLineItem, CartUpdate, UserId};
use actor_store::{ActorClient, FrameworkError, ResourceClient, Transaction};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }
}

impl CartClient {
    /// The buyer's cart lines in insertion order.
    #[instrument(skip(self))]
    pub async fn list_items(&self, buyer_id: UserId) -> Result<Vec<CartLineItem>, CartError> {
        Ok(self
            .get(buyer_id)
            .await?
            .map(|cart| cart.items)
            .unwrap_or_default())
    }

    /// Adds `quantity` kg of `batch`, creating the cart on first use and merging into an
    /// existing line for the same batch.
    #[instrument(skip(self, batch), fields(batch_id = %batch.batch_id))]
    pub async fn add_item(
        &self,
        buyer_id: UserId,
        batch: &Batch,
        quantity: u32,
    ) -> Result<CartUpdate, CartError> {
        debug!("Sending upsert");
        let line = CartLineItem::from_batch(batch, quantity);
        let update = self
            .inner
            .transact(move |tx: &mut Transaction<'_, Cart>| {
                let mut cart = tx
                    .get(&buyer_id)
                    .cloned()
                    .unwrap_or_else(|| Cart::new(buyer_id.clone()));
                let update = cart.add_line(line)?;
                tx.insert(cart);
                Ok::<_, CartError>(update)
            })
            .await?;
        info!(
            selected = update.item.selected_quantity,
            merged = update.merged,
            "Cart line stored"
        );
        Ok(update)
    }

    /// Sets the selected quantity of one line.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        buyer_id: UserId,
        batch_id: BatchId,
        quantity: u32,
    ) -> Result<CartLineItem, CartError> {
        let action = CartAction::UpdateQuantity {
            batch_id: batch_id.clone(),
            quantity,
        };
        match self.inner.perform_action(buyer_id, action).await {
            Ok(CartActionResult::UpdateQuantity(item)) => Ok(item),
            Ok(_) => unreachable!("UpdateQuantity action must return UpdateQuantity result"),
            Err(FrameworkError::NotFound(_)) => Err(CartError::ItemNotFound(batch_id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes one line; returns whether it was there.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, buyer_id: UserId, batch_id: BatchId) -> Result<bool, CartError> {
        match self
            .inner
            .perform_action(buyer_id, CartAction::RemoveItem(batch_id))
            .await
        {
            Ok(CartActionResult::RemoveItem(removed)) => Ok(removed),
            Ok(_) => unreachable!("RemoveItem action must return RemoveItem result"),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Empties the cart; returns the lines that were in it.
    #[instrument(skip(self))]
    pub async fn clear(&self, buyer_id: &UserId) -> Result<Vec<CartLineItem>, CartError> {
        match self
            .inner
            .perform_action(buyer_id.clone(), CartAction::Clear)
            .await
        {
            Ok(CartActionResult::Clear(items)) => {
                info!(removed = items.len(), "Cart cleared");
                Ok(items)
            }
            Ok(_) => unreachable!("Clear action must return Clear result"),
            Err(FrameworkError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BatchStatus;
    use actor_store::mock::MockClient;
    use chrono::Utc;

    fn batch(id: &str, quantity: u32, price: f64) -> Batch {
        Batch {
            batch_id: id.into(),
            farmer_id: "farmer_1".into(),
            variety: "Nagpur Mandarin".to_string(),
            quantity,
            price_per_kg: price,
            harvest_date: None,
            status: BatchStatus::Available,
            quality_grade: "A".to_string(),
            location: "Katol".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_item_creates_cart_on_first_use() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_transact().with_rows(vec![]);

        let client = CartClient::new(mock.client());
        let update = client
            .add_item("buyer_1".into(), &batch("NG2024001", 10, 80.0), 3)
            .await
            .unwrap();

        assert!(!update.merged);
        assert_eq!(update.item.selected_quantity, 3);
        assert_eq!(update.item.available_quantity, 10);
        assert_eq!(mock.commits(), 1);
    }

    #[tokio::test]
    async fn test_add_item_rejects_more_than_available() {
        let mut existing = Cart::new("buyer_1".into());
        existing.items.push(CartLineItem::from_batch(&batch("NG2024001", 10, 80.0), 8));

        let mut mock = MockClient::<Cart>::new();
        mock.expect_transact().with_rows(vec![existing]);

        let client = CartClient::new(mock.client());
        let err = client
            .add_item("buyer_1".into(), &batch("NG2024001", 9, 80.0), 2)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CartError::QuantityOutOfRange {
                batch_id: "NG2024001".into(),
                requested: 10,
                available: 9,
            }
        );
        assert_eq!(mock.commits(), 0);
    }

    #[tokio::test]
    async fn test_missing_cart_reads_as_empty() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get().return_ok(None);
        mock.expect_action()
            .return_err(FrameworkError::NotFound("buyer_1".into()));
        mock.expect_action()
            .return_err(FrameworkError::NotFound("buyer_1".into()));
        mock.expect_action()
            .return_err(FrameworkError::NotFound("buyer_1".into()));

        let client = CartClient::new(mock.client());
        let buyer = UserId::from("buyer_1");
        assert!(client.list_items(buyer.clone()).await.unwrap().is_empty());
        assert!(!client
            .remove_item(buyer.clone(), "NG2024001".into())
            .await
            .unwrap());
        assert!(client.clear(&buyer).await.unwrap().is_empty());
        assert_eq!(
            client
                .update_quantity(buyer, "NG2024001".into(), 1)
                .await
                .unwrap_err(),
            CartError::ItemNotFound("NG2024001".into())
        );
        mock.verify();
    }
}

//! # Batch Client
//!
//! Provides a high-level API for the Inventory Ledger.
//! It wraps a `ResourceClient<Batch>` and exposes domain-specific methods.
use crate::batch_actor::{stock, BatchAction, BatchActionResult, InventoryError};
use crate::model::{
    Batch, BatchCreate, BatchEdit, BatchId, BatchRegistration, BatchUpdate, StockLevel, StockLine,
    UserId,
};
use actor_store::{ActorClient, ResourceClient, Transaction};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// How a keyed decrement was settled.
#[derive(Debug, Clone, PartialEq)]
pub enum DecrementOutcome {
    /// Stock was taken; remaining quantities per batch.
    Applied(Vec<StockLevel>),
    /// A decrement with the same key already committed; nothing was taken this time.
    Replayed,
}

/// Client for interacting with the Batch actor.
#[derive(Clone)]
pub struct BatchClient {
    inner: ResourceClient<Batch>,
}

impl BatchClient {
    pub fn new(inner: ResourceClient<Batch>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Batch> for BatchClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<Batch> {
        &self.inner
    }
}

impl BatchClient {
    /// Registers a new `available` batch owned by `farmer_id`.
    #[instrument(skip(self, details), fields(batch_id = %details.batch_id))]
    pub async fn register_batch(
        &self,
        farmer_id: UserId,
        details: BatchCreate,
    ) -> Result<BatchId, InventoryError> {
        debug!("Sending request");
        let id = self
            .inner
            .create(BatchRegistration { farmer_id, details })
            .await?;
        info!(batch_id = %id, "Batch registered");
        Ok(id)
    }

    /// Fetches a batch, failing with `BatchNotFound` when absent.
    #[instrument(skip(self))]
    pub async fn get_batch(&self, id: BatchId) -> Result<Batch, InventoryError> {
        self.get(id.clone())
            .await?
            .ok_or(InventoryError::BatchNotFound(id))
    }

    /// Marketplace listing: available batches with stock, optionally of one variety.
    #[instrument(skip(self))]
    pub async fn list_available(
        &self,
        variety: Option<String>,
    ) -> Result<Vec<Batch>, InventoryError> {
        let mut batches = self
            .list(move |batch: &Batch| {
                batch.is_available()
                    && variety
                        .as_deref()
                        .map_or(true, |v| batch.variety.eq_ignore_ascii_case(v))
            })
            .await?;
        batches.sort_by(|a, b| a.batch_id.cmp(&b.batch_id));
        Ok(batches)
    }

    /// Every batch registered by `farmer_id`, newest first.
    #[instrument(skip(self))]
    pub async fn list_by_farmer(&self, farmer_id: UserId) -> Result<Vec<Batch>, InventoryError> {
        let mut batches = self
            .list(move |batch: &Batch| batch.farmer_id == farmer_id)
            .await?;
        batches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.batch_id.cmp(&b.batch_id))
        });
        Ok(batches)
    }

    /// Owner edit of price, quantity or description.
    #[instrument(skip(self))]
    pub async fn update_batch(
        &self,
        requester: UserId,
        id: BatchId,
        changes: BatchUpdate,
    ) -> Result<Batch, InventoryError> {
        debug!("Sending request");
        let batch = self
            .inner
            .update(id, BatchEdit { requester, changes })
            .await?;
        info!(batch_id = %batch.batch_id, quantity = batch.quantity, "Batch updated");
        Ok(batch)
    }

    /// Check the current stock level for a batch.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: BatchId) -> Result<u32, InventoryError> {
        debug!("Checking stock for batch {}", id);
        match self.inner.perform_action(id, BatchAction::CheckStock).await? {
            BatchActionResult::CheckStock(level) => Ok(level),
        }
    }

    /// The Inventory Decrement: takes every line or none.
    ///
    /// With a `key`, a repeat of an already committed decrement is reported as
    /// [`DecrementOutcome::Replayed`] and takes nothing.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn decrement_stock(
        &self,
        lines: Vec<StockLine>,
        key: Option<String>,
    ) -> Result<DecrementOutcome, InventoryError> {
        debug!("Sending decrement");
        let run = move |tx: &mut Transaction<'_, Batch>| stock::decrement(tx, &lines);
        let outcome = match key {
            Some(key) => match self.inner.transact_once(key, run).await? {
                Some(levels) => DecrementOutcome::Applied(levels),
                None => DecrementOutcome::Replayed,
            },
            None => DecrementOutcome::Applied(self.inner.transact(run).await?),
        };
        info!(?outcome, "Decrement settled");
        Ok(outcome)
    }

    /// Puts stock back, reversing a decrement.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn restock(&self, lines: Vec<StockLine>) -> Result<Vec<StockLevel>, InventoryError> {
        debug!("Sending restock");
        let levels = self
            .inner
            .transact(move |tx: &mut Transaction<'_, Batch>| stock::restock(tx, &lines))
            .await?;
        info!(batches = levels.len(), "Restocked");
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BatchStatus;
    use actor_store::mock::{create_mock_client, expect_action, MockClient};
    use actor_store::FrameworkError;
    use chrono::Utc;

    fn batch(id: &str, quantity: u32) -> Batch {
        Batch {
            batch_id: id.into(),
            farmer_id: "farmer_1".into(),
            variety: "Nagpur Mandarin".to_string(),
            quantity,
            price_per_kg: 80.0,
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
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Batch>(10);
        let batch_client = BatchClient::new(client);

        let check_task =
            tokio::spawn(async move { batch_client.check_stock("NG2024001".into()).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, BatchId::from("NG2024001"));
        assert!(matches!(action, BatchAction::CheckStock));

        responder.send(Ok(BatchActionResult::CheckStock(42))).unwrap();
        assert_eq!(check_task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_decrement_checks_every_line() {
        let mut mock = MockClient::<Batch>::new();
        mock.expect_transact()
            .with_rows(vec![batch("NG2024001", 5), batch("NG2024002", 1)]);

        let client = BatchClient::new(mock.client());
        let err = client
            .decrement_stock(
                vec![StockLine::new("NG2024001", 2), StockLine::new("NG2024002", 3)],
                None,
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                batch_id: "NG2024002".into(),
                requested: 3,
                available: 1,
            }
        );
        assert_eq!(mock.commits(), 0);
        mock.verify();
    }

    #[tokio::test]
    async fn test_decrement_unknown_batch() {
        let mut mock = MockClient::<Batch>::new();
        mock.expect_transact().with_rows(vec![batch("NG2024001", 5)]);

        let client = BatchClient::new(mock.client());
        let err = client
            .decrement_stock(vec![StockLine::new("NG2099999", 1)], None)
            .await
            .unwrap_err();
        assert_eq!(err, InventoryError::BatchNotFound("NG2099999".into()));
    }

    #[tokio::test]
    async fn test_keyed_decrement_reports_replay() {
        let mut mock = MockClient::<Batch>::new();
        mock.expect_transact().with_rows(vec![batch("NG2024001", 5)]);
        mock.expect_transact().return_replayed();

        let client = BatchClient::new(mock.client());
        let lines = vec![StockLine::new("NG2024001", 2)];

        let first = client
            .decrement_stock(lines.clone(), Some("order:1".to_string()))
            .await
            .unwrap();
        assert_eq!(
            first,
            DecrementOutcome::Applied(vec![StockLevel {
                batch_id: "NG2024001".into(),
                remaining: 3,
            }])
        );

        let second = client
            .decrement_stock(lines, Some("order:1".to_string()))
            .await
            .unwrap();
        assert_eq!(second, DecrementOutcome::Replayed);
        assert_eq!(mock.commits(), 1);
    }

    #[tokio::test]
    async fn test_get_batch_missing() {
        let mut mock = MockClient::<Batch>::new();
        mock.expect_get().return_ok(None);
        mock.expect_get().return_err(FrameworkError::ActorClosed);

        let client = BatchClient::new(mock.client());
        assert_eq!(
            client.get_batch("NG2024001".into()).await.unwrap_err(),
            InventoryError::BatchNotFound("NG2024001".into())
        );
        assert!(matches!(
            client.get_batch("NG2024001".into()).await,
            Err(InventoryError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_list_available_filters_and_sorts() {
        let mut sold = batch("NG2024003", 0);
        sold.status = BatchStatus::Sold;
        let mut valencia = batch("NG2024000", 4);
        valencia.variety = "Valencia".to_string();

        let mut mock = MockClient::<Batch>::new();
        mock.expect_list().return_ok(vec![
            batch("NG2024002", 3),
            sold,
            batch("NG2024001", 7),
            valencia,
        ]);

        let client = BatchClient::new(mock.client());
        let listed = client
            .list_available(Some("nagpur mandarin".to_string()))
            .await
            .unwrap();
        let ids: Vec<_> = listed.iter().map(|b| b.batch_id.0.as_str()).collect();
        assert_eq!(ids, ["NG2024001", "NG2024002"]);
    }
}

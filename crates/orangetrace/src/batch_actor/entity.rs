//! ActorEntity implementation for the Batch domain type.
//!
//! Registration validates the form, updates are owner-only, and stock never goes below
//! zero. See the trait implementation on [`Batch`] for method documentation.

use super::actions::{BatchAction, BatchActionResult};
use super::error::InventoryError;
use crate::model::{Batch, BatchEdit, BatchId, BatchRegistration, BatchStatus};
use actor_store::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

impl Batch {
    /// Takes `kg` out of the batch. A batch emptied this way is `sold`.
    pub(crate) fn withdraw(&mut self, kg: u32) -> Result<u32, InventoryError> {
        if kg == 0 {
            return Err(InventoryError::ValidationError(format!(
                "quantity for {} must be at least 1",
                self.batch_id
            )));
        }
        if self.quantity < kg {
            return Err(InventoryError::InsufficientStock {
                batch_id: self.batch_id.clone(),
                requested: kg,
                available: self.quantity,
            });
        }
        self.quantity -= kg;
        self.refresh_status();
        Ok(self.quantity)
    }

    /// Puts `kg` back into the batch.
    pub(crate) fn restock(&mut self, kg: u32) -> u32 {
        self.quantity = self.quantity.saturating_add(kg);
        self.refresh_status();
        self.quantity
    }

    fn refresh_status(&mut self) {
        self.status = match (self.status, self.quantity) {
            (_, 0) => BatchStatus::Sold,
            (BatchStatus::Sold, _) => BatchStatus::Available,
            (status, _) => status,
        };
        self.updated_at = Utc::now();
    }
}

fn check_price(price: f64) -> Result<(), InventoryError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(InventoryError::ValidationError(
            "price per kg must be greater than zero".to_string(),
        ))
    }
}

#[async_trait]
impl ActorEntity for Batch {
    type Id = BatchId;
    type Create = BatchRegistration;
    type Update = BatchEdit;
    type Action = BatchAction;
    type ActionResult = BatchActionResult;
    type Context = ();
    type Error = InventoryError;

    fn id(&self) -> &BatchId {
        &self.batch_id
    }

    /// Batches are keyed by the code the farmer registers.
    fn assign_id(params: &BatchRegistration) -> BatchId {
        BatchId(params.details.batch_id.trim().to_string())
    }

    /// Validates the registration form.
    ///
    /// # Rules
    /// - batch id and variety are non-empty
    /// - quantity is at least 1 kg
    /// - price per kg is greater than zero
    fn from_create_params(id: BatchId, params: BatchRegistration) -> Result<Self, Self::Error> {
        if id.0.is_empty() {
            return Err(InventoryError::ValidationError(
                "batch id is required".to_string(),
            ));
        }
        if params.details.variety.trim().is_empty() {
            return Err(InventoryError::ValidationError(
                "variety is required".to_string(),
            ));
        }
        if params.details.quantity == 0 {
            return Err(InventoryError::ValidationError(
                "quantity must be at least 1 kg".to_string(),
            ));
        }
        check_price(params.details.price_per_kg)?;

        Ok(Batch::new(id, params.farmer_id, params.details))
    }

    /// Applies an owner edit.
    ///
    /// # Fields Updated
    /// - `price_per_kg`: must stay greater than zero
    /// - `quantity`: 0 marks the batch `sold`, a positive quantity re-lists a sold batch
    /// - `description`
    async fn on_update(&mut self, edit: BatchEdit, _ctx: &()) -> Result<(), Self::Error> {
        if edit.requester != self.farmer_id {
            return Err(InventoryError::Forbidden(self.batch_id.clone()));
        }

        let changes = edit.changes;
        if let Some(price) = changes.price_per_kg {
            check_price(price)?;
            self.price_per_kg = price;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(quantity) = changes.quantity {
            self.quantity = quantity;
        }
        self.refresh_status();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BatchAction,
        _ctx: &(),
    ) -> Result<BatchActionResult, Self::Error> {
        match action {
            BatchAction::CheckStock => Ok(BatchActionResult::CheckStock(self.quantity)),
        }
    }
}

//! Inventory ledger documents.

use crate::model::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Batches (the code printed on the QR label, e.g. `NG2024001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Available,
    Reserved,
    Sold,
}

/// A farmer-registered lot of oranges.
///
/// # Actor Store
/// This struct implements the [`ActorEntity`](actor_store::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_store::ResourceActor).
///
/// See [`impl ActorEntity for Batch`](#impl-ActorEntity-for-Batch) for details on:
/// - Creation parameters ([`BatchRegistration`])
/// - Update parameters ([`BatchEdit`])
/// - Custom actions ([`BatchAction`](crate::batch_actor::BatchAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub batch_id: BatchId,
    pub farmer_id: UserId,
    pub variety: String,
    /// Remaining kilograms. Never negative by construction.
    pub quantity: u32,
    pub price_per_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harvest_date: Option<NaiveDate>,
    pub status: BatchStatus,
    pub quality_grade: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Builds an `available` batch from a registration.
    pub fn new(id: BatchId, farmer_id: UserId, details: BatchCreate) -> Self {
        let now = Utc::now();
        Self {
            batch_id: id,
            farmer_id,
            variety: details.variety.trim().to_string(),
            quantity: details.quantity,
            price_per_kg: details.price_per_kg,
            harvest_date: details.harvest_date,
            status: BatchStatus::Available,
            quality_grade: details.quality_grade,
            location: details.location,
            description: details.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Listed on the marketplace: `available` with stock left.
    pub fn is_available(&self) -> bool {
        self.status == BatchStatus::Available && self.quantity > 0
    }
}

/// Form fields a farmer submits to register a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreate {
    pub batch_id: String,
    pub variety: String,
    pub quantity: u32,
    pub price_per_kg: f64,
    #[serde(default)]
    pub harvest_date: Option<NaiveDate>,
    #[serde(default)]
    pub quality_grade: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create payload for the batch actor: the form plus the registering farmer.
#[derive(Debug, Clone)]
pub struct BatchRegistration {
    pub farmer_id: UserId,
    pub details: BatchCreate,
}

/// Fields the owning farmer may change after registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdate {
    pub price_per_kg: Option<f64>,
    pub quantity: Option<u32>,
    pub description: Option<String>,
}

/// Update payload for the batch actor; edits are accepted only from the owner.
#[derive(Debug, Clone)]
pub struct BatchEdit {
    pub requester: UserId,
    pub changes: BatchUpdate,
}

/// One batch and a quantity in kilograms, as decremented or restocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLine {
    pub batch_id: BatchId,
    pub quantity: u32,
}

impl StockLine {
    pub fn new(batch_id: impl Into<BatchId>, quantity: u32) -> Self {
        Self {
            batch_id: batch_id.into(),
            quantity,
        }
    }
}

/// Quantity left in a batch after a stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    pub batch_id: BatchId,
    pub remaining: u32,
}

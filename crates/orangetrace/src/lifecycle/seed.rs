use crate::batch_actor::InventoryError;
use crate::clients::BatchClient;
use crate::model::{BatchCreate, BatchId, UserId};
use tracing::{info, warn};

/// Farmer that owns the demo batches.
pub const DEMO_FARMER: &str = "farmer_demo";

fn demo_batch(
    batch_id: &str,
    variety: &str,
    quantity: u32,
    price_per_kg: f64,
    location: &str,
) -> BatchCreate {
    BatchCreate {
        batch_id: batch_id.to_string(),
        variety: variety.to_string(),
        quantity,
        price_per_kg,
        harvest_date: None,
        quality_grade: "A".to_string(),
        location: location.to_string(),
        description: None,
    }
}

/// Registers the demo batches used by the verify page (`NG2024001`..`NG2024003`).
///
/// Batches that already exist are skipped, so seeding twice is harmless.
pub async fn seed_demo_batches(batches: &BatchClient) -> Result<Vec<BatchId>, InventoryError> {
    let farmer = UserId::from(DEMO_FARMER);
    let forms = [
        demo_batch("NG2024001", "Nagpur Mandarin", 5, 45.0, "Katol Road, Nagpur"),
        demo_batch("NG2024002", "Valencia Orange", 40, 42.0, "Wadi, Nagpur"),
        demo_batch("NG2024003", "Nagpur Mandarin", 25, 48.0, "Kalmeshwar, Nagpur"),
    ];

    let mut registered = Vec::with_capacity(forms.len());
    for form in forms {
        match batches.register_batch(farmer.clone(), form).await {
            Ok(id) => registered.push(id),
            Err(InventoryError::AlreadyRegistered(id)) => {
                warn!(batch_id = %id, "Demo batch already present");
            }
            Err(e) => return Err(e),
        }
    }

    info!(count = registered.len(), "Demo batches seeded");
    Ok(registered)
}

use crate::model::{Batch, Purchase};
use crate::web::error::ApiError;
use crate::web::extractors::UserIdentity;
use crate::web::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Serialize)]
pub struct FarmerOverview {
    pub batches: Vec<Batch>,
    pub purchases: Vec<Purchase>,
}

/// The farmer's batches and every purchase made from them.
pub async fn farmer_overview(
    State(state): State<AppState>,
    UserIdentity(farmer): UserIdentity,
) -> Result<Json<FarmerOverview>, ApiError> {
    let batches = state.batches.list_by_farmer(farmer).await?;
    let ids: HashSet<_> = batches.iter().map(|b| b.batch_id.clone()).collect();
    let purchases = if ids.is_empty() {
        Vec::new()
    } else {
        state.orders.sales_for_batches(ids).await?
    };
    Ok(Json(FarmerOverview { batches, purchases }))
}

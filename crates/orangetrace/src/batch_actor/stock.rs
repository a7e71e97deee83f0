//! Multi-batch stock movements.
//!
//! Both functions run inside one [`Transaction`] over the batch collection: every line is
//! checked against the batch's current quantity as the transaction sees it, and any failure
//! discards all staged writes. Lines naming the same batch accumulate.

use super::error::InventoryError;
use crate::model::{Batch, BatchId, StockLevel, StockLine};
use actor_store::Transaction;

/// Sums quantities per batch, keeping the order in which batches first appear.
fn merge_lines(lines: &[StockLine]) -> Result<Vec<(BatchId, u32)>, InventoryError> {
    if lines.is_empty() {
        return Err(InventoryError::ValidationError(
            "at least one line is required".to_string(),
        ));
    }

    let mut merged: Vec<(BatchId, u32)> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            return Err(InventoryError::ValidationError(format!(
                "quantity for {} must be at least 1",
                line.batch_id
            )));
        }
        match merged.iter_mut().find(|(id, _)| id == &line.batch_id) {
            Some((_, total)) => *total = total.saturating_add(line.quantity),
            None => merged.push((line.batch_id.clone(), line.quantity)),
        }
    }
    Ok(merged)
}

/// The Inventory Decrement: all lines or none.
pub(crate) fn decrement(
    tx: &mut Transaction<'_, Batch>,
    lines: &[StockLine],
) -> Result<Vec<StockLevel>, InventoryError> {
    let mut levels = Vec::new();
    for (batch_id, quantity) in merge_lines(lines)? {
        let batch = tx
            .get_mut(&batch_id)
            .ok_or_else(|| InventoryError::BatchNotFound(batch_id.clone()))?;
        let remaining = batch.withdraw(quantity)?;
        levels.push(StockLevel {
            batch_id,
            remaining,
        });
    }
    Ok(levels)
}

/// Compensation for a decrement: puts every line back.
pub(crate) fn restock(
    tx: &mut Transaction<'_, Batch>,
    lines: &[StockLine],
) -> Result<Vec<StockLevel>, InventoryError> {
    let mut levels = Vec::new();
    for (batch_id, quantity) in merge_lines(lines)? {
        let batch = tx
            .get_mut(&batch_id)
            .ok_or_else(|| InventoryError::BatchNotFound(batch_id.clone()))?;
        let remaining = batch.restock(quantity);
        levels.push(StockLevel {
            batch_id,
            remaining,
        });
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_lines_accumulate() {
        let lines = vec![
            StockLine::new("NG2024001", 2),
            StockLine::new("NG2024002", 1),
            StockLine::new("NG2024001", 3),
        ];
        let merged = merge_lines(&lines).unwrap();
        assert_eq!(
            merged,
            vec![
                (BatchId::from("NG2024001"), 5),
                (BatchId::from("NG2024002"), 1)
            ]
        );
    }

    #[test]
    fn empty_and_zero_lines_are_rejected() {
        assert!(matches!(
            merge_lines(&[]),
            Err(InventoryError::ValidationError(_))
        ));
        assert!(matches!(
            merge_lines(&[StockLine::new("NG2024001", 0)]),
            Err(InventoryError::ValidationError(_))
        ));
    }
}

//! Custom actions for the Batch actor.
//!
//! Single-batch operations beyond CRUD, handled by
//! [`ActorEntity::handle_action`](actor_store::ActorEntity::handle_action). Stock movements
//! that span several batches run as transactions instead, see [`super::stock`].

/// Custom actions for Batch entities.
#[derive(Debug, Clone)]
pub enum BatchAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
}

/// Results from BatchActions - variants match 1:1 with BatchAction
#[derive(Debug, Clone)]
pub enum BatchActionResult {
    /// Current stock level in kilograms.
    CheckStock(u32),
}

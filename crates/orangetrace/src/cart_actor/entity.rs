//! ActorEntity implementation for the Cart domain type.
//!
//! Every mutation keeps `1 <= selectedQuantity <= availableQuantity` for the line it
//! touches, checked against the line's availability snapshot.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::model::{BatchId, Cart, CartCreate, CartLineItem, CartUpdate, UserId};
use actor_store::ActorEntity;
use async_trait::async_trait;

fn check_bounds(batch_id: &BatchId, requested: u32, available: u32) -> Result<(), CartError> {
    if requested == 0 || requested > available {
        return Err(CartError::QuantityOutOfRange {
            batch_id: batch_id.clone(),
            requested,
            available,
        });
    }
    Ok(())
}

impl Cart {
    /// Upserts a line.
    ///
    /// A new line is stored as given. An existing line keeps its add-time price and gains
    /// the new selection on top of its own, with availability refreshed from `line`.
    pub(crate) fn add_line(&mut self, line: CartLineItem) -> Result<CartUpdate, CartError> {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.batch_id == line.batch_id)
        {
            let selected = existing.selected_quantity.saturating_add(line.selected_quantity);
            check_bounds(&line.batch_id, selected, line.available_quantity)?;
            existing.selected_quantity = selected;
            existing.available_quantity = line.available_quantity;
            return Ok(CartUpdate {
                item: existing.clone(),
                merged: true,
            });
        }

        check_bounds(
            &line.batch_id,
            line.selected_quantity,
            line.available_quantity,
        )?;
        self.items.push(line.clone());
        Ok(CartUpdate {
            item: line,
            merged: false,
        })
    }

    fn set_quantity(&mut self, batch_id: &BatchId, quantity: u32) -> Result<CartLineItem, CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.batch_id == batch_id)
            .ok_or_else(|| CartError::ItemNotFound(batch_id.clone()))?;
        check_bounds(batch_id, quantity, item.available_quantity)?;
        item.selected_quantity = quantity;
        Ok(item.clone())
    }

    fn remove_line(&mut self, batch_id: &BatchId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.batch_id != batch_id);
        self.items.len() != before
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = CartCreate;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn id(&self) -> &UserId {
        &self.buyer_id
    }

    /// One cart per buyer, keyed by the buyer id.
    fn assign_id(params: &CartCreate) -> UserId {
        params.buyer_id.clone()
    }

    fn from_create_params(id: UserId, _params: CartCreate) -> Result<Self, Self::Error> {
        Ok(Cart::new(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles custom actions for the Cart entity.
    ///
    /// # Actions
    /// - `UpdateQuantity`: sets one line's selection, bounded by its availability snapshot
    /// - `RemoveItem`: drops one line, reports whether it existed
    /// - `Clear`: empties the cart, returns what was in it
    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &(),
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::UpdateQuantity { batch_id, quantity } => self
                .set_quantity(&batch_id, quantity)
                .map(CartActionResult::UpdateQuantity),
            CartAction::RemoveItem(batch_id) => {
                Ok(CartActionResult::RemoveItem(self.remove_line(&batch_id)))
            }
            CartAction::Clear => Ok(CartActionResult::Clear(std::mem::take(&mut self.items))),
        }
    }
}

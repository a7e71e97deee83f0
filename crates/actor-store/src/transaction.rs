//! # Transactions
//!
//! A [`Transaction`] is a staged view over one actor's collection. Reads see the committed
//! store overlaid with the transaction's own writes; nothing reaches the store until the
//! actor commits. The actor runs one transaction at a time, so a transaction never observes
//! a half-applied concurrent write and two conflicting transactions are strictly ordered.

use crate::entity::ActorEntity;
use std::collections::HashMap;

/// Staged read-modify-write access to a collection.
pub struct Transaction<'a, T: ActorEntity> {
    store: &'a HashMap<T::Id, T>,
    // `None` marks a staged delete.
    staged: HashMap<T::Id, Option<T>>,
}

impl<'a, T: ActorEntity> Transaction<'a, T> {
    pub(crate) fn new(store: &'a HashMap<T::Id, T>) -> Self {
        Self {
            store,
            staged: HashMap::new(),
        }
    }

    /// Reads an entity as this transaction currently sees it.
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        match self.staged.get(id) {
            Some(staged) => staged.as_ref(),
            None => self.store.get(id),
        }
    }

    /// Returns `true` if the entity is visible to this transaction.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Mutable access to an entity; the first call copies it into the staging area.
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        if !self.staged.contains_key(id) {
            let current = self.store.get(id)?.clone();
            self.staged.insert(id.clone(), Some(current));
        }
        self.staged.get_mut(id).and_then(Option::as_mut)
    }

    /// Stages an insert (or replacement). Returns the previously visible value.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let previous = self.get(item.id()).cloned();
        self.staged.insert(item.id().clone(), Some(item));
        previous
    }

    /// Stages a delete. Returns the previously visible value.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let previous = self.get(id).cloned();
        if previous.is_some() {
            self.staged.insert(id.clone(), None);
        }
        previous
    }

    /// Iterates every entity visible to this transaction, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let staged = &self.staged;
        self.store
            .iter()
            .filter(move |(id, _)| !staged.contains_key(*id))
            .map(|(_, item)| item)
            .chain(staged.values().filter_map(Option::as_ref))
    }

    /// Number of staged writes.
    pub fn pending_writes(&self) -> usize {
        self.staged.len()
    }

    pub(crate) fn into_writes(self) -> HashMap<T::Id, Option<T>> {
        self.staged
    }
}

/// How the actor settled a transaction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    /// The closure succeeded and its writes are now visible.
    Committed,
    /// The closure failed; the store is unchanged.
    Aborted,
    /// The idempotency key was already committed; the closure was not run.
    Replayed,
}

/// Applies staged writes to a store.
pub(crate) fn commit<T: ActorEntity>(
    store: &mut HashMap<T::Id, T>,
    writes: HashMap<T::Id, Option<T>>,
) -> usize {
    let count = writes.len();
    for (id, write) in writes {
        match write {
            Some(item) => {
                store.insert(id, item);
            }
            None => {
                store.remove(&id);
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Crate {
        id: u32,
        kg: u32,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("crate error")]
    struct CrateError;

    #[async_trait]
    impl ActorEntity for Crate {
        type Id = u32;
        type Create = u32;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = CrateError;

        fn id(&self) -> &u32 {
            &self.id
        }
        fn assign_id(params: &u32) -> u32 {
            *params
        }
        fn from_create_params(id: u32, _: u32) -> Result<Self, CrateError> {
            Ok(Self { id, kg: 0 })
        }
        async fn on_update(&mut self, _: (), _: &()) -> Result<(), CrateError> {
            Ok(())
        }
        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), CrateError> {
            Ok(())
        }
    }

    fn store() -> HashMap<u32, Crate> {
        [(1, Crate { id: 1, kg: 10 }), (2, Crate { id: 2, kg: 4 })]
            .into_iter()
            .collect()
    }

    #[test]
    fn reads_see_own_writes_but_store_is_untouched() {
        let store = store();
        let mut tx = Transaction::new(&store);

        tx.get_mut(&1).unwrap().kg -= 3;
        tx.remove(&2);
        tx.insert(Crate { id: 3, kg: 1 });

        assert_eq!(tx.get(&1).unwrap().kg, 7);
        assert!(!tx.contains(&2));
        assert!(tx.contains(&3));
        assert_eq!(tx.iter().count(), 2);
        assert_eq!(store[&1].kg, 10);
        assert!(store.contains_key(&2));
    }

    #[test]
    fn commit_applies_every_staged_write() {
        let mut live = store();
        let writes = {
            let mut tx = Transaction::new(&live);
            tx.get_mut(&2).unwrap().kg = 0;
            tx.remove(&1);
            tx.into_writes()
        };
        assert_eq!(commit(&mut live, writes), 2);
        assert!(!live.contains_key(&1));
        assert_eq!(live[&2].kg, 0);
    }

    #[test]
    fn removed_rows_are_not_resurrected_by_get_mut() {
        let store = store();
        let mut tx = Transaction::new(&store);
        tx.remove(&1);
        assert!(tx.get_mut(&1).is_none());
        assert!(tx.get_mut(&9).is_none());
    }
}

//! # Generic Actor Server
//!
//! `ResourceActor` owns one collection and serves every request for it from a single Tokio
//! task. Sequential processing is what makes each request, transactions included, atomic
//! with respect to every other request on the same collection.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::transaction::{self, Transaction, TxStatus};
use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Default number of committed idempotency keys remembered per collection.
pub const DEFAULT_IDEMPOTENCY_WINDOW: usize = 1024;

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Batch>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
///
/// # Operations
///
/// * **Create**: assigns the id via `T::assign_id`, rejects duplicates, builds the entity,
///   runs `on_create`, stores it.
/// * **Get** / **List**: clone matching entities out of the store.
/// * **Update** / **Action**: run the hook against the stored entity in place.
/// * **Delete**: runs `on_delete`, then removes the entity.
/// * **Transact**: runs the closure against a [`Transaction`]; commits all staged writes if it
///   succeeds, discards them otherwise. Keyed transactions are remembered once committed and
///   answered with [`TxStatus::Replayed`] on resubmission.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    applied: VecDeque<String>,
    applied_index: HashSet<String>,
    key_window: usize,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            applied: VecDeque::new(),
            applied_index: HashSet::new(),
            key_window: DEFAULT_IDEMPOTENCY_WINDOW,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Sets how many committed idempotency keys are remembered (minimum 1).
    pub fn with_idempotency_window(mut self, window: usize) -> Self {
        self.key_window = window.max(1);
        self
    }

    fn remember(&mut self, key: String) {
        if self.applied_index.insert(key.clone()) {
            self.applied.push_back(key);
        }
        while self.applied.len() > self.key_window {
            if let Some(evicted) = self.applied.pop_front() {
                self.applied_index.remove(&evicted);
            }
        }
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Batch" rather than "orangetrace::model::batch::Batch"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::assign_id(&params);
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|&item| filter(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        // Hooks mutate a copy so a failed update leaves the stored entity intact.
                        let mut staged = item.clone();
                        if let Err(e) = staged.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        *item = staged.clone();
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(staged));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let mut staged = item.clone();
                        let result = staged
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                *item = staged;
                                info!(entity_type, %id, "Action ok");
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Transact {
                    key,
                    run,
                    respond_to,
                } => {
                    if let Some(key) = key.as_deref() {
                        if self.applied_index.contains(key) {
                            info!(entity_type, key, "Transaction replayed");
                            let _ = respond_to.send(Ok(TxStatus::Replayed));
                            continue;
                        }
                    }

                    let mut tx = Transaction::new(&self.store);
                    let commit = run(&mut tx);
                    let writes = tx.into_writes();
                    let status = if commit {
                        let written = transaction::commit(&mut self.store, writes);
                        if let Some(key) = key {
                            self.remember(key);
                        }
                        info!(entity_type, written, size = self.store.len(), "Transaction committed");
                        TxStatus::Committed
                    } else {
                        debug!(entity_type, discarded = writes.len(), "Transaction aborted");
                        TxStatus::Aborted
                    };
                    let _ = respond_to.send(Ok(status));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug)]
    struct Counter {
        id: String,
        value: i64,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("negative")]
    struct Negative;

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = String;
        type Create = String;
        type Update = i64;
        type Action = i64;
        type ActionResult = i64;
        type Context = ();
        type Error = Negative;

        fn id(&self) -> &String {
            &self.id
        }
        fn assign_id(params: &String) -> String {
            params.clone()
        }
        fn from_create_params(id: String, _: String) -> Result<Self, Negative> {
            Ok(Self { id, value: 0 })
        }
        async fn on_update(&mut self, value: i64, _: &()) -> Result<(), Negative> {
            self.value = value;
            if value < 0 {
                return Err(Negative);
            }
            Ok(())
        }
        async fn handle_action(&mut self, delta: i64, _: &()) -> Result<i64, Negative> {
            self.value += delta;
            if self.value < 0 {
                return Err(Negative);
            }
            Ok(self.value)
        }
    }

    #[tokio::test]
    async fn failed_hooks_leave_entity_unchanged() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create("c".to_string()).await.unwrap();
        assert_eq!(client.perform_action(id.clone(), 5).await.unwrap(), 5);
        assert!(client.perform_action(id.clone(), -9).await.is_err());
        assert!(client.update(id.clone(), -1).await.is_err());
        assert_eq!(client.get(id).await.unwrap().unwrap().value, 5);
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.run(()));

        client.create("c".to_string()).await.unwrap();
        let err = client.create("c".to_string()).await.unwrap_err();
        assert!(matches!(err, FrameworkError::AlreadyExists(id) if id == "c"));
    }

    #[tokio::test]
    async fn idempotency_window_evicts_oldest_key() {
        let (actor, client) = ResourceActor::<Counter>::new(8);
        tokio::spawn(actor.with_idempotency_window(1).run(()));
        client.create("c".to_string()).await.unwrap();

        fn bump(tx: &mut Transaction<'_, Counter>) -> Result<(), FrameworkError> {
            if let Some(counter) = tx.get_mut(&"c".to_string()) {
                counter.value += 1;
            }
            Ok(())
        }

        assert!(client.transact_once("k1", bump).await.unwrap().is_some());
        assert!(client.transact_once("k1", bump).await.unwrap().is_none());
        assert!(client.transact_once("k2", bump).await.unwrap().is_some());
        // k1 fell out of the window, so it applies again.
        assert!(client.transact_once("k1", bump).await.unwrap().is_some());

        assert_eq!(client.get("c".to_string()).await.unwrap().unwrap().value, 3);
    }
}

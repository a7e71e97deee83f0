//! # Generic Client
//!
//! The sending half of a resource actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, TransactionFn};
use crate::transaction::{Transaction, TxStatus};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a channel sender, so it is cheap to clone and share across tasks. Every method
/// resolves to `Result<_, FrameworkError>` except the transaction methods, which return the
/// caller's own error type.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Returns every entity for which `filter` is true, in no particular order.
    pub async fn list<F>(&self, filter: F) -> Result<Vec<T>, FrameworkError>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.request(|respond_to| ResourceRequest::List {
            filter: Box::new(filter),
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Runs `f` as one all-or-nothing transaction over the collection.
    ///
    /// Staged writes commit only when `f` returns `Ok`.
    pub async fn transact<R, E, F>(&self, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Transaction<'_, T>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<FrameworkError> + Send + 'static,
    {
        match self.submit(None, f).await? {
            Some(outcome) => outcome,
            None => Err(FrameworkError::ActorDropped.into()),
        }
    }

    /// Like [`transact`](Self::transact), keyed for safe retries.
    ///
    /// Returns `Ok(None)` when a transaction with the same key already committed; `f` is not
    /// run in that case.
    pub async fn transact_once<R, E, F>(
        &self,
        key: impl Into<String>,
        f: F,
    ) -> Result<Option<R>, E>
    where
        F: FnOnce(&mut Transaction<'_, T>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<FrameworkError> + Send + 'static,
    {
        match self.submit(Some(key.into()), f).await? {
            Some(outcome) => outcome.map(Some),
            None => Ok(None),
        }
    }

    /// Sends the transaction and waits for the actor to settle it.
    ///
    /// The closure reports its own outcome through a side channel; the actor only learns
    /// whether to commit.
    async fn submit<R, E, F>(
        &self,
        key: Option<String>,
        f: F,
    ) -> Result<Option<Result<R, E>>, FrameworkError>
    where
        F: FnOnce(&mut Transaction<'_, T>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Send + 'static,
    {
        let (outcome_tx, outcome_rx) = oneshot::channel();
        let run = into_transaction_fn::<T, _>(move |tx| {
            let outcome = f(tx);
            let commit = outcome.is_ok();
            let _ = outcome_tx.send(outcome);
            commit
        });

        let status = self
            .request(|respond_to| ResourceRequest::Transact {
                key,
                run,
                respond_to,
            })
            .await?;

        match status {
            TxStatus::Replayed => Ok(None),
            TxStatus::Committed | TxStatus::Aborted => outcome_rx
                .await
                .map(Some)
                .map_err(|_| FrameworkError::ActorDropped),
        }
    }
}

fn into_transaction_fn<T, F>(f: F) -> TransactionFn<T>
where
    T: ActorEntity,
    F: for<'a> FnOnce(&mut Transaction<'a, T>) -> bool + Send + 'static,
{
    Box::new(f)
}

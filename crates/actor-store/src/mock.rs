//! # Mock Clients & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a
//! queue of expectations instead of a running actor. Use it to test code *around* a client
//! (a domain client wrapper, or an actor whose hooks call other actors) deterministically.
//!
//! | | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | Expectations, seeded snapshots | Real collection |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error injection** | `return_err` | Needs real failing state |
//!
//! ## Transactions
//!
//! A transact expectation is seeded with the rows the transaction should see. The submitted
//! closure runs against that snapshot exactly as it would inside the actor, so domain
//! validation (stock checks, quantity bounds) is exercised for real; the mock then answers
//! `Committed` or `Aborted` according to the closure's outcome.
//!
//! ```rust,ignore
//! let mut batches = MockClient::<Batch>::new();
//! batches.expect_transact().with_rows(vec![batch("NG2024001", 5)]);
//!
//! let client = BatchClient::new(batches.client());
//! let err = client.decrement_stock(lines_for(6), None).await.unwrap_err();
//! assert!(matches!(err, InventoryError::InsufficientStock { .. }));
//! batches.verify();
//! ```
//!
//! ## Raw channel helpers
//!
//! [`create_mock_client`] returns a client plus the receiving end of its channel, and the
//! `expect_*` functions pull the next request off it so a test can assert on the payload and
//! answer by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, TransactionFn};
use crate::transaction::{Transaction, TxStatus};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A queued answer for the next request.
enum Expectation<T: ActorEntity> {
    Get {
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        response: Result<T, FrameworkError>,
    },
    Action {
        response: Result<T::ActionResult, FrameworkError>,
    },
    Transact {
        seed: TransactSeed<T>,
    },
}

enum TransactSeed<T> {
    Rows(Vec<T>),
    Replayed,
    Fail(FrameworkError),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectation queue poisoned")
        .push_back(expectation);
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    commits: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let commits = Arc::new(AtomicUsize::new(0));
        let queue = expectations.clone();
        let commit_counter = commits.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { filter, respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(
                            response.map(|rows| rows.into_iter().filter(|row| filter(row)).collect()),
                        );
                    }
                    (
                        ResourceRequest::Update { respond_to, .. },
                        Some(Expectation::Update { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Transact { run, respond_to, .. },
                        Some(Expectation::Transact { seed }),
                    ) => {
                        let response = settle(run, seed);
                        if matches!(response, Ok(TxStatus::Committed)) {
                            commit_counter.fetch_add(1, Ordering::SeqCst);
                        }
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            commits,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> ResponseBuilder<T, Option<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Get { response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ResponseBuilder<T, T::Id> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Create {
            response,
        })
    }

    /// Expects a `list` operation. The request's filter is applied to the returned rows.
    pub fn expect_list(&mut self) -> ResponseBuilder<T, Vec<T>> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self) -> ResponseBuilder<T, T> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Update {
            response,
        })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self) -> ResponseBuilder<T, T::ActionResult> {
        ResponseBuilder::new(self.expectations.clone(), |response| Expectation::Action {
            response,
        })
    }

    /// Expects a `transact` / `transact_once` operation.
    pub fn expect_transact(&mut self) -> TransactExpectationBuilder<T> {
        TransactExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of transactions the mock has committed so far.
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

fn settle<T: ActorEntity>(
    run: TransactionFn<T>,
    seed: TransactSeed<T>,
) -> Result<TxStatus, FrameworkError> {
    match seed {
        TransactSeed::Fail(error) => Err(error),
        TransactSeed::Replayed => Ok(TxStatus::Replayed),
        TransactSeed::Rows(rows) => {
            let snapshot: HashMap<T::Id, T> = rows
                .into_iter()
                .map(|row| (row.id().clone(), row))
                .collect();
            let mut tx = Transaction::new(&snapshot);
            if run(&mut tx) {
                Ok(TxStatus::Committed)
            } else {
                Ok(TxStatus::Aborted)
            }
        }
    }
}

/// Builder for expectations answered with a fixed value.
pub struct ResponseBuilder<T: ActorEntity, V> {
    expectations: Queue<T>,
    wrap: fn(Result<V, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, V> ResponseBuilder<T, V> {
    fn new(expectations: Queue<T>, wrap: fn(Result<V, FrameworkError>) -> Expectation<T>) -> Self {
        Self { expectations, wrap }
    }

    /// Answers the request successfully.
    pub fn return_ok(self, value: V) {
        push(&self.expectations, (self.wrap)(Ok(value)));
    }

    /// Answers the request with an error.
    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, (self.wrap)(Err(error)));
    }
}

/// Builder for transaction expectations.
pub struct TransactExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> TransactExpectationBuilder<T> {
    /// Runs the transaction against `rows`.
    pub fn with_rows(self, rows: Vec<T>) {
        push(
            &self.expectations,
            Expectation::Transact {
                seed: TransactSeed::Rows(rows),
            },
        );
    }

    /// Answers as if the idempotency key had already committed.
    pub fn return_replayed(self) {
        push(
            &self.expectations,
            Expectation::Transact {
                seed: TransactSeed::Replayed,
            },
        );
    }

    /// Fails the request before the transaction runs.
    pub fn return_err(self, error: FrameworkError) {
        push(
            &self.expectations,
            Expectation::Transact {
                seed: TransactSeed::Fail(error),
            },
        );
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, crate::Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, crate::Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, crate::Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Transact, with its idempotency key.
pub async fn expect_transact<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Option<String>, TransactionFn<T>, crate::Response<TxStatus>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Transact {
            key,
            run,
            respond_to,
        }) => Some((key, run, respond_to)),
        _ => None,
    }
}

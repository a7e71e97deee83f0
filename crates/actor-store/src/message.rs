//! # Generic Messages
//!
//! Request types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::transaction::{Transaction, TxStatus};
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Predicate used by `List` requests.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Body of a `Transact` request. Returns `true` when its staged writes should commit.
pub type TransactionFn<T> = Box<dyn for<'a> FnOnce(&mut Transaction<'a, T>) -> bool + Send>;

/// Message sent to the actor to request an operation.
///
/// The variants map onto the document-store operations: CRUD, a filtered scan, a custom
/// `Action` on one entity, and `Transact`, an all-or-nothing read-modify-write over any
/// number of entities of the collection.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Transact {
        key: Option<String>,
        run: TransactionFn<T>,
        respond_to: Response<TxStatus>,
    },
}

impl<T: ActorEntity> fmt::Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRequest::Create { params, .. } => {
                f.debug_struct("Create").field("params", params).finish()
            }
            ResourceRequest::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            ResourceRequest::List { .. } => f.write_str("List"),
            ResourceRequest::Update { id, update, .. } => f
                .debug_struct("Update")
                .field("id", id)
                .field("update", update)
                .finish(),
            ResourceRequest::Delete { id, .. } => {
                f.debug_struct("Delete").field("id", id).finish()
            }
            ResourceRequest::Action { id, action, .. } => f
                .debug_struct("Action")
                .field("id", id)
                .field("action", action)
                .finish(),
            ResourceRequest::Transact { key, .. } => {
                f.debug_struct("Transact").field("key", key).finish()
            }
        }
    }
}

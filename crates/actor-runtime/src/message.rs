//! # Messages
//!
//! Message types sent from clients to actors, and from directory clients to the
//! per-kind registry.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request processed by a single `ResourceActor`.
///
/// The instance already *is* the resource (one actor per key), so there is no id
/// in the message. Everything the state supports is expressed as an
/// [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// Request processed by an `ActorRegistry`.
#[derive(Debug)]
pub enum RegistryRequest<T: ActorEntity> {
    /// Return the client for `key`, spawning the instance on first access.
    Resolve {
        key: T::Id,
        respond_to: Response<ResourceClient<T>>,
    },
    /// Return the client for `key` only if a live instance exists. Never spawns.
    Lookup {
        key: T::Id,
        respond_to: Response<Option<ResourceClient<T>>>,
    },
    /// Forget the instance for `key`. Responds with whether one existed.
    Retire {
        key: T::Id,
        respond_to: Response<bool>,
    },
    /// Number of instances currently registered.
    Count { respond_to: Response<usize> },
}

//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every piece of per-key state
//! (a seat pool, a broadcast lock, …) must implement to be owned by a `ResourceActor`.
//! Each key gets its own instance of the state, built lazily on first access and
//! mutated only by that instance's message loop.
//!
//! # Architecture Note
//! By defining a contract (`ActorEntity`) that every coordination primitive must satisfy,
//! the mailbox loop, the per-key registry and the clients are written *once* and reused
//! for every kind of actor.
//!
//! Associated types keep the wiring type-safe: a seat pool only accepts seat actions,
//! and you can't accidentally send a lock action to it.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_touch`] runs before every action with the same `now` the action
//!   will see. This is where lazy expiry (TTL sweeps) belongs.
//!
//! The default implementation does nothing.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::time::Instant;

/// Trait for state owned by exactly one `ResourceActor` per key.
///
/// # Context
/// `Context` carries runtime configuration (timeouts, policies) and is injected when the
/// actor is started, not when it is constructed. The registry clones it into every
/// instance it spawns, so it must be `Clone`.
///
/// # No Suspension
/// Hooks are synchronous on purpose: an action is a pure in-memory read/write plus a
/// clock comparison, so the mailbox loop never yields in the middle of one.
pub trait ActorEntity: Send + 'static {
    /// Short, stable name of the actor kind (e.g. `"seats"`). Combined with the key
    /// to form the instance name, e.g. `seats:evt_42`.
    const KIND: &'static str;

    /// The key one instance is addressed by (e.g. an event id).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Enum of operations this actor understands.
    type Action: Send + Debug;

    /// Result returned for an action.
    type ActionResult: Send + Debug;

    /// The runtime context injected into the actor.
    /// Use `()` if nothing is needed.
    type Context: Clone + Send + Sync + 'static;

    /// Construct the empty state for a freshly spawned instance.
    fn from_key(key: &Self::Id) -> Self;

    /// Called before every action. Use it to drop state that has gone stale.
    fn on_touch(&mut self, _now: Instant, _ctx: &Self::Context) {}

    /// Handle one action. `now` is read once per message by the actor loop.
    fn handle_action(
        &mut self,
        action: Self::Action,
        now: Instant,
        ctx: &Self::Context,
    ) -> Self::ActionResult;
}

/// Builds the stable instance name for a key, e.g. `lock:evt_42`.
pub fn instance_name<T: ActorEntity>(key: &T::Id) -> String {
    format!("{}:{}", T::KIND, key)
}

//! # Lock Actor
//!
//! The per-event broadcast lock: at most one live broadcaster, reclaimed automatically
//! once the owner stops heartbeating.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_runtime::ActorEntity) implementation for [`BroadcastLock`]
//! - [`error`] - [`LockError`] type
//! - [`actions`] - [`LockAction`] and [`LockActionResult`]
//! - [`registry()`] - Factory function that creates the per-event registry and its client
//!
//! ## State machine
//!
//! `UNOWNED -> OWNED` on claim, `OWNED -> OWNED` on owner heartbeat or a new claim,
//! `OWNED -> UNOWNED` on release by the owner. `STALE` is never stored; it is computed
//! from the time since the owner was last seen.
//!
//! A claim always wins. There is no "reject if busy" mode.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::BroadcastLock;
use actor_runtime::{ActorRegistry, RegistryClient};

/// Creates the registry that spawns one broadcast lock per event.
pub fn registry(
    mailbox_size: usize,
) -> (ActorRegistry<BroadcastLock>, RegistryClient<BroadcastLock>) {
    ActorRegistry::new(mailbox_size)
}

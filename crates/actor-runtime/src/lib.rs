//! # Actor Runtime
//!
//! This crate provides the building blocks for keyed, single-threaded actors on top of
//! Tokio: one actor instance per key (for example, per live event), each owning exactly one
//! piece of state and processing its mailbox strictly one message at a time.
//!
//! ## Why per-key actors?
//!
//! - **Isolated state** – an instance's state is reachable only through its mailbox. No
//!   shared memory, no locks around state.
//! - **Sequential processing** – operations on one instance are totally ordered by
//!   arrival, so invariants like "at most one owner" hold without further coordination.
//! - **Independent instances** – instances for different keys never share anything, so
//!   there is no cross-key synchronization to get wrong.
//! - **Cheap restarts** – state is in memory only; a new instance starts empty.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model)
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the state and its operations
//! 2. **Runtime Layer** ([`ResourceActor`], [`ActorRegistry`]) - mailbox loop and per-key instantiation
//! 3. **Interface Layer** ([`ResourceClient`], [`RegistryClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Lazy Expiry
//!
//! There are no timers. [`ActorEntity::on_touch`] runs before every action with the same
//! `now` the action sees, so stale entries are dropped exactly when the next decision
//! would otherwise read them.
//!
//! ## Testing
//!
//! The [`mock`] module has a `MockClient` and receiver-based helpers for unit-testing
//! domain clients without spawning actors. Time is read through `tokio::time::Instant`, so
//! TTL behaviour can be tested with `tokio::time::pause` and `advance`.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod registry;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{instance_name, ActorEntity};
pub use error::FrameworkError;
pub use message::{RegistryRequest, ResourceRequest, Response};
pub use registry::{ActorRegistry, RegistryClient};

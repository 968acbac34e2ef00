//! # Seat Actor
//!
//! The per-event capacity registry: admits viewer sessions under a caller-supplied
//! ceiling and reports occupancy.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_runtime::ActorEntity) implementation for [`SeatPool`]
//! - [`error`] - [`SeatError`] type for type-safe error handling
//! - [`actions`] - [`SeatAction`] and [`SeatActionResult`]
//! - [`registry()`] - Factory function that creates the per-event registry and its client
//!
//! ## Rules
//!
//! - A seat is granted only while `active < limit`; `active == limit` is full.
//! - Sessions silent for longer than the heartbeat timeout are pruned before every
//!   operation. There is no background timer.
//! - `leave` is idempotent.
//!
//! ## Usage
//!
//! ```rust
//! use live_gate::seat_actor;
//! use live_gate::clients::SeatDirectory;
//! use live_gate::model::{EventId, SeatPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (registry, registry_client) = seat_actor::registry(32);
//!     tokio::spawn(registry.run(SeatPolicy::default()));
//!
//!     let seats = SeatDirectory::new(registry_client);
//!     let pool = seats.for_event(&EventId::from("evt_1")).await?;
//!     let admitted = pool.admit(150).await?;
//!     assert!(admitted.granted);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::SeatPool;
use actor_runtime::{ActorRegistry, RegistryClient};

/// Creates the registry that spawns one seat pool per event.
pub fn registry(mailbox_size: usize) -> (ActorRegistry<SeatPool>, RegistryClient<SeatPool>) {
    ActorRegistry::new(mailbox_size)
}

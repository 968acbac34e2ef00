//! Type-safe wrappers around [`ResourceClient`](actor_runtime::ResourceClient) and
//! [`RegistryClient`](actor_runtime::RegistryClient).
//!
//! A `*Client` talks to one event's actor; a `*Directory` finds (or spawns) it.

pub mod lock_client;
pub mod seat_client;

pub use lock_client::*;
pub use seat_client::*;

//! # System Lifecycle
//!
//! Starting, wiring, and stopping the actor registries.
//!
//! ## Late binding
//!
//! Registries are created first and receive their runtime policy only when started with
//! `run(context)`. Each registry clones that policy into every instance it spawns:
//!
//! ```rust,ignore
//! let (seat_registry, seat_client) = seat_actor::registry(config.actor_mailbox_size);
//! tokio::spawn(seat_registry.run(SeatPolicy::from(&config)));
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. Drop every client, so the registry mailboxes close.
//! 2. Each registry drops its instance clients and returns.
//! 3. Each instance drains its mailbox and stops when no client is left.
//! 4. [`EventSystem::shutdown`] awaits the registry tasks.

pub mod event_system;
pub mod tracing;

pub use event_system::EventSystem;
pub use self::tracing::setup_tracing;

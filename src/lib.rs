//! # Live Gate
//!
//! Per-event coordination for paid live streams: a capped pool of viewer seats and an
//! exclusive broadcaster lock, each held by its own single-threaded actor.
//!
//! ## Core Components
//!
//! - **[model]**: the actor states ([`SeatPool`](model::SeatPool),
//!   [`BroadcastLock`](model::BroadcastLock)), their results, and the event record.
//! - **[seat_actor]** / **[lock_actor]**: the operations each actor understands and the
//!   rules it enforces.
//! - **[clients]**: type-safe wrappers that hide the message passing.
//! - **[gateway]**: authorizes callers against the event record and forwards the request.
//! - **[lifecycle]**: starts and stops the registries; sets up tracing.
//! - **[config]**: environment-driven settings with defaults.
//!
//! ## Architecture Notes
//!
//! ### One actor per event and kind
//! The first request for an event spawns that event's seat pool (or lock). Every
//! invariant ("active < limit", "at most one live owner") is scoped to one instance, so
//! nothing is shared across events.
//!
//! ### No timers
//! Silent viewers and absent broadcasters are detected lazily. A seat pool prunes before
//! every operation; a lock computes staleness whenever it is read.
//!
//! ### Ephemeral state
//! Nothing is persisted. A restarted instance starts with zero sessions and no lock
//! owner. This is only correct if the process outlives the events it serves.
//!
//! ### Errors
//! Full pools, unknown sessions and stale locks are ordinary results. `Err` means the
//! actor could not be reached or the gateway refused the caller.

pub mod clients;
pub mod config;
pub mod gateway;
pub mod lifecycle;
pub mod lock_actor;
pub mod model;
pub mod seat_actor;

//! # Runtime Errors
//!
//! Errors produced by the runtime itself. Domain outcomes (a full seat pool, a stale
//! lock) are never errors; they travel back inside the action result.

/// Errors that can occur while talking to an actor.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}

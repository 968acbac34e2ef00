//! Error types for the broadcast lock actor.

use thiserror::Error;

/// Errors that can occur while talking to a broadcast lock.
///
/// A stale or stolen lease is reported in the result, not here.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LockError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<actor_runtime::FrameworkError> for LockError {
    fn from(e: actor_runtime::FrameworkError) -> Self {
        LockError::ActorCommunicationError(e.to_string())
    }
}

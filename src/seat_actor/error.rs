//! Error types for the seat pool actor.

use thiserror::Error;

/// Errors that can occur while talking to a seat pool.
///
/// A full pool or an unknown session is *not* an error; those come back as results.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeatError {
    /// The registry or the pool's mailbox is gone.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The pool answered with a result for a different operation.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}

impl From<actor_runtime::FrameworkError> for SeatError {
    fn from(e: actor_runtime::FrameworkError) -> Self {
        SeatError::ActorCommunicationError(e.to_string())
    }
}

//! Gateway error type.

use super::store::StoreError;
use crate::lock_actor::LockError;
use crate::model::EventId;
use crate::seat_actor::SeatError;
use thiserror::Error;

/// Why the gateway refused to forward a request.
///
/// Refusals from the actors themselves (full pool, stale lock) are not errors and come
/// back inside the `Ok` result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Event not paid: {0}")]
    NotPaid(EventId),

    #[error("Event expired: {0}")]
    Expired(EventId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Seat(#[from] SeatError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

//! Operations understood by a broadcast lock.

use crate::model::{ClaimResult, LeaseHeartbeatResult, ReleaseResult, StatusResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockAction {
    /// Take the lock, evicting whoever holds it.
    Claim,
    /// Renew the lease if `lease_id` is still the owner.
    Heartbeat { lease_id: String },
    /// Drop the lease if `lease_id` is the owner.
    Release { lease_id: String },
    Status,
}

/// Results from LockActions - variants match 1:1 with LockAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockActionResult {
    Claim(ClaimResult),
    Heartbeat(LeaseHeartbeatResult),
    Release(ReleaseResult),
    Status(StatusResult),
}

//! The broadcast lock of one event: at most one live broadcaster at a time.
//!
//! # Actor Framework
//! [`BroadcastLock`] implements the [`ActorEntity`](actor_runtime::ActorEntity) trait; each
//! event gets its own lock owned by a [`ResourceActor`](actor_runtime::ResourceActor).
//!
//! Staleness is never stored. It is computed from `last_seen_at` whenever the lock is
//! read, see [`BroadcastLock::is_stale`].

use crate::config::{Config, DEFAULT_BROADCAST_LOCK_TTL_SECS};
use crate::model::FailureReason;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct BroadcastLock {
    pub(crate) lease: Option<BroadcastLease>,
}

/// The current holder of the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastLease {
    pub owner_session_id: String,
    /// Last claim or owner heartbeat.
    pub last_seen_at: Instant,
}

impl BroadcastLock {
    pub fn lease(&self) -> Option<&BroadcastLease> {
        self.lease.as_ref()
    }

    /// No owner, or the owner has been silent for longer than `ttl`.
    pub fn is_stale(&self, now: Instant, ttl: Duration) -> bool {
        match &self.lease {
            None => true,
            Some(lease) => now.saturating_duration_since(lease.last_seen_at) > ttl,
        }
    }
}

/// Runtime context of every broadcast lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    pub ttl: Duration,
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_BROADCAST_LOCK_TTL_SECS),
        }
    }
}

impl From<&Config> for LockPolicy {
    fn from(config: &Config) -> Self {
        Self {
            ttl: config.broadcast_lock_ttl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub ok: bool,
    pub lease_id: String,
}

/// `ok: false` means the caller must claim again; `still_owner: false` with `ok: true`
/// means someone else took over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseHeartbeatResult {
    pub ok: bool,
    pub still_owner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResult {
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResult {
    /// A live (non-stale) owner exists.
    pub has_owner: bool,
    pub stale: bool,
    /// Milliseconds since the recorded owner was last seen, if any owner is recorded.
    pub last_seen_ago_ms: Option<u64>,
}

//! The viewer seat pool of one event.
//!
//! # Actor Framework
//! [`SeatPool`] implements the [`ActorEntity`](actor_runtime::ActorEntity) trait, so each
//! event gets its own pool owned by a [`ResourceActor`](actor_runtime::ResourceActor).
//!
//! See [`impl ActorEntity for SeatPool`](#impl-ActorEntity-for-SeatPool) for the
//! operations ([`SeatAction`](crate::seat_actor::SeatAction)).

use crate::config::{Config, DEFAULT_SEAT_HEARTBEAT_TIMEOUT_SECS};
use crate::model::FailureReason;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
pub struct SeatPool {
    /// session id -> last time the session was admitted or heartbeated.
    pub(crate) sessions: HashMap<String, Instant>,
}

impl SeatPool {
    /// Number of sessions currently held, including any not yet pruned.
    pub fn active(&self) -> u32 {
        u32::try_from(self.sessions.len()).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }
}

/// Runtime context of every seat pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatPolicy {
    /// A session silent for longer than this is pruned on the next touch.
    pub heartbeat_timeout: Duration,
}

impl Default for SeatPolicy {
    fn default() -> Self {
        Self {
            heartbeat_timeout: Duration::from_secs(DEFAULT_SEAT_HEARTBEAT_TIMEOUT_SECS),
        }
    }
}

impl From<&Config> for SeatPolicy {
    fn from(config: &Config) -> Self {
        Self {
            heartbeat_timeout: config.seat_heartbeat_timeout,
        }
    }
}

/// Result of asking for a seat. A full pool is `granted: false`, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmitResult {
    pub granted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub active: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatHeartbeatResult {
    pub ok: bool,
    pub active: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// Leaving always succeeds, known session or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveResult {
    pub ok: bool,
    pub active: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResult {
    pub active: u32,
    pub limit: u32,
}

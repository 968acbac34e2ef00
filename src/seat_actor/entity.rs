//! Seat pool logic and its [`ActorEntity`] implementation.
//!
//! Every operation starts by pruning sessions that have been silent for longer than the
//! heartbeat timeout (the runtime calls `on_touch` first). Nothing else ever evicts a
//! session, so occupancy is always computed from fresh sessions only.

use super::actions::{SeatAction, SeatActionResult};
use crate::model::{
    AdmitResult, EventId, FailureReason, LeaveResult, SeatHeartbeatResult, SeatPolicy, SeatPool,
    StatsResult,
};
use actor_runtime::ActorEntity;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

impl SeatPool {
    /// Drops every session with `now - last_seen > timeout`. Returns how many were dropped.
    pub fn prune(&mut self, now: Instant, timeout: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, last_seen| now.saturating_duration_since(*last_seen) <= timeout);
        before - self.sessions.len()
    }

    /// Admits a new session if `active < limit`.
    pub fn admit(&mut self, limit: u32, now: Instant) -> AdmitResult {
        if self.active() >= limit {
            info!(active = self.active(), limit, "Seat pool full");
            return AdmitResult {
                granted: false,
                session_id: None,
                active: self.active(),
                limit,
            };
        }

        let session_id = Uuid::new_v4().to_string();
        self.sessions.insert(session_id.clone(), now);
        info!(%session_id, active = self.active(), limit, "Admitted");
        AdmitResult {
            granted: true,
            session_id: Some(session_id),
            active: self.active(),
            limit,
        }
    }

    /// Refreshes a known session. Unknown ids (including pruned ones) are refused
    /// without touching anything.
    pub fn heartbeat(&mut self, session_id: &str, limit: u32, now: Instant) -> SeatHeartbeatResult {
        match self.sessions.get_mut(session_id) {
            Some(last_seen) => {
                *last_seen = now;
                SeatHeartbeatResult {
                    ok: true,
                    active: self.active(),
                    limit,
                    reason: None,
                }
            }
            None => {
                debug!(session_id, "Heartbeat for unknown session");
                SeatHeartbeatResult {
                    ok: false,
                    active: self.active(),
                    limit,
                    reason: Some(FailureReason::InvalidSession),
                }
            }
        }
    }

    /// Removes a session if present.
    pub fn leave(&mut self, session_id: &str, limit: u32) -> LeaveResult {
        if self.sessions.remove(session_id).is_some() {
            info!(session_id, active = self.active(), limit, "Left");
        }
        LeaveResult {
            ok: true,
            active: self.active(),
            limit,
        }
    }

    pub fn stats(&self, limit: u32) -> StatsResult {
        StatsResult {
            active: self.active(),
            limit,
        }
    }
}

impl ActorEntity for SeatPool {
    const KIND: &'static str = "seats";
    type Id = EventId;
    type Action = SeatAction;
    type ActionResult = SeatActionResult;
    type Context = SeatPolicy;

    /// A fresh pool has no sessions.
    fn from_key(_key: &EventId) -> Self {
        Self::default()
    }

    fn on_touch(&mut self, now: Instant, ctx: &SeatPolicy) {
        let pruned = self.prune(now, ctx.heartbeat_timeout);
        if pruned > 0 {
            info!(pruned, active = self.active(), "Pruned silent sessions");
        }
    }

    fn handle_action(&mut self, action: SeatAction, now: Instant, _ctx: &SeatPolicy) -> SeatActionResult {
        match action {
            SeatAction::Admit { limit } => SeatActionResult::Admit(self.admit(limit, now)),
            SeatAction::Heartbeat { session_id, limit } => {
                SeatActionResult::Heartbeat(self.heartbeat(&session_id, limit, now))
            }
            SeatAction::Leave { session_id, limit } => {
                SeatActionResult::Leave(self.leave(&session_id, limit))
            }
            SeatAction::Stats { limit } => SeatActionResult::Stats(self.stats(limit)),
        }
    }
}

//! Broadcast lock logic and its [`ActorEntity`] implementation.

use super::actions::{LockAction, LockActionResult};
use crate::model::{
    BroadcastLease, BroadcastLock, ClaimResult, EventId, FailureReason, LeaseHeartbeatResult,
    LockPolicy, ReleaseResult, StatusResult,
};
use actor_runtime::ActorEntity;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

impl BroadcastLock {
    /// Issues a fresh lease and makes it the owner, whatever was there before.
    pub fn claim(&mut self, now: Instant) -> ClaimResult {
        let lease_id = Uuid::new_v4().to_string();
        if let Some(previous) = self.lease.take() {
            info!(previous = %previous.owner_session_id, %lease_id, "Lease taken over");
        } else {
            info!(%lease_id, "Lease claimed");
        }
        self.lease = Some(BroadcastLease {
            owner_session_id: lease_id.clone(),
            last_seen_at: now,
        });
        ClaimResult { ok: true, lease_id }
    }

    pub fn heartbeat(&mut self, lease_id: &str, now: Instant, ttl: Duration) -> LeaseHeartbeatResult {
        if lease_id.is_empty() {
            return LeaseHeartbeatResult {
                ok: false,
                still_owner: false,
                reason: Some(FailureReason::MissingSession),
            };
        }
        if self.is_stale(now, ttl) {
            warn!(lease_id, "Heartbeat on stale lock");
            return LeaseHeartbeatResult {
                ok: false,
                still_owner: false,
                reason: Some(FailureReason::StaleLock),
            };
        }

        let still_owner = match self.lease.as_mut() {
            Some(lease) if lease.owner_session_id == lease_id => {
                lease.last_seen_at = now;
                true
            }
            _ => {
                debug!(lease_id, "Heartbeat from dethroned holder");
                false
            }
        };
        LeaseHeartbeatResult {
            ok: true,
            still_owner,
            reason: None,
        }
    }

    /// Clears the lease if `lease_id` owns it. Always `ok`.
    pub fn release(&mut self, lease_id: &str) -> ReleaseResult {
        let owns = self
            .lease
            .as_ref()
            .is_some_and(|lease| lease.owner_session_id == lease_id);
        if owns {
            self.lease = None;
            info!(lease_id, "Lease released");
        }
        ReleaseResult { ok: true }
    }

    pub fn status(&self, now: Instant, ttl: Duration) -> StatusResult {
        let stale = self.is_stale(now, ttl);
        let last_seen_ago_ms = self.lease.as_ref().map(|lease| {
            u64::try_from(now.saturating_duration_since(lease.last_seen_at).as_millis())
                .unwrap_or(u64::MAX)
        });
        StatusResult {
            has_owner: self.lease.is_some() && !stale,
            stale,
            last_seen_ago_ms,
        }
    }
}

impl ActorEntity for BroadcastLock {
    const KIND: &'static str = "lock";
    type Id = EventId;
    type Action = LockAction;
    type ActionResult = LockActionResult;
    type Context = LockPolicy;

    fn from_key(_key: &EventId) -> Self {
        Self::default()
    }

    fn handle_action(&mut self, action: LockAction, now: Instant, ctx: &LockPolicy) -> LockActionResult {
        match action {
            LockAction::Claim => LockActionResult::Claim(self.claim(now)),
            LockAction::Heartbeat { lease_id } => {
                LockActionResult::Heartbeat(self.heartbeat(&lease_id, now, ctx.ttl))
            }
            LockAction::Release { lease_id } => LockActionResult::Release(self.release(&lease_id)),
            LockAction::Status => LockActionResult::Status(self.status(now, ctx.ttl)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(25);

    #[test]
    fn test_claim_on_empty_lock() {
        let now = Instant::now();
        let mut lock = BroadcastLock::default();
        assert!(lock.is_stale(now, TTL));

        let claimed = lock.claim(now);
        assert!(claimed.ok);
        assert!(!claimed.lease_id.is_empty());
        assert_eq!(lock.lease().unwrap().owner_session_id, claimed.lease_id);
        assert!(!lock.is_stale(now, TTL));
    }

    #[test]
    fn test_claim_takes_over_live_lease() {
        let now = Instant::now();
        let mut lock = BroadcastLock::default();
        let a = lock.claim(now).lease_id;
        let b = lock.claim(now + Duration::from_secs(1)).lease_id;
        assert_ne!(a, b);

        let dethroned = lock.heartbeat(&a, now + Duration::from_secs(2), TTL);
        assert_eq!(
            dethroned,
            LeaseHeartbeatResult {
                ok: true,
                still_owner: false,
                reason: None
            }
        );
        // A dethroned holder's heartbeat must not renew the new owner.
        assert_eq!(
            lock.lease().unwrap().last_seen_at,
            now + Duration::from_secs(1)
        );

        let owner = lock.heartbeat(&b, now + Duration::from_secs(3), TTL);
        assert!(owner.ok);
        assert!(owner.still_owner);
    }

    #[test]
    fn test_heartbeat_with_empty_id_is_missing_session() {
        let now = Instant::now();
        let mut lock = BroadcastLock::default();
        lock.claim(now);

        let result = lock.heartbeat("", now, TTL);
        assert!(!result.ok);
        assert_eq!(result.reason, Some(FailureReason::MissingSession));
        assert_eq!(lock.lease().unwrap().last_seen_at, now);
    }

    #[test]
    fn test_heartbeat_after_ttl_is_stale_lock() {
        let t0 = Instant::now();
        let mut lock = BroadcastLock::default();
        let id = lock.claim(t0).lease_id;

        // Exactly at the TTL the lease is still live.
        assert!(lock.heartbeat(&id, t0 + TTL, TTL).still_owner);

        let late = t0 + TTL + TTL + Duration::from_millis(1);
        let result = lock.heartbeat(&id, late, TTL);
        assert_eq!(
            result,
            LeaseHeartbeatResult {
                ok: false,
                still_owner: false,
                reason: Some(FailureReason::StaleLock)
            }
        );
    }

    #[test]
    fn test_heartbeat_on_unowned_lock_is_stale_lock() {
        let mut lock = BroadcastLock::default();
        let result = lock.heartbeat("anything", Instant::now(), TTL);
        assert_eq!(result.reason, Some(FailureReason::StaleLock));
    }

    #[test]
    fn test_release_only_by_owner() {
        let now = Instant::now();
        let mut lock = BroadcastLock::default();
        let id = lock.claim(now).lease_id;

        assert!(lock.release("someone-else").ok);
        assert!(lock.release("").ok);
        assert_eq!(lock.lease().unwrap().owner_session_id, id);

        assert!(lock.release(&id).ok);
        assert!(lock.lease().is_none());
        assert!(lock.release(&id).ok);
    }

    #[test]
    fn test_status_reports_staleness() {
        let t0 = Instant::now();
        let mut lock = BroadcastLock::default();

        assert_eq!(
            lock.status(t0, TTL),
            StatusResult {
                has_owner: false,
                stale: true,
                last_seen_ago_ms: None
            }
        );

        lock.claim(t0);
        assert_eq!(
            lock.status(t0 + Duration::from_secs(10), TTL),
            StatusResult {
                has_owner: true,
                stale: false,
                last_seen_ago_ms: Some(10_000)
            }
        );
        assert_eq!(
            lock.status(t0 + Duration::from_secs(30), TTL),
            StatusResult {
                has_owner: false,
                stale: true,
                last_seen_ago_ms: Some(30_000)
            }
        );
    }

    #[test]
    fn test_claim_supersedes_stale_lease() {
        let t0 = Instant::now();
        let mut lock = BroadcastLock::default();
        let old = lock.claim(t0).lease_id;

        let later = t0 + Duration::from_secs(60);
        let LockActionResult::Claim(fresh) =
            lock.handle_action(LockAction::Claim, later, &LockPolicy { ttl: TTL })
        else {
            panic!("expected claim result");
        };
        assert_ne!(old, fresh.lease_id);
        assert!(lock.status(later, TTL).has_owner);
    }
}

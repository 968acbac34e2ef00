//! # Gateway
//!
//! Resolves an event id to its seat pool and broadcast lock, authorizes the caller
//! against the [`EventRecord`], and forwards the already-authorized request.
//!
//! The record check and the actor's decision are two separate steps. An event that
//! expires in between still gets that one request through.
//!
//! | Operation | Key | Also requires |
//! |-----------|-----|---------------|
//! | [`Gateway::event_info`] | `secret_key` | |
//! | [`Gateway::view_session`] | `secret_key` | paid, not expired |
//! | [`Gateway::viewer_heartbeat`], [`Gateway::leave`], [`Gateway::stats`] | `secret_key` | |
//! | [`Gateway::claim_broadcast`] | `broadcast_key` | paid, not expired |
//! | [`Gateway::broadcast_heartbeat`], [`Gateway::release_broadcast`], [`Gateway::broadcast_status`] | `broadcast_key` | |
//!
//! ## Expired events
//!
//! Once an event has expired the gateway never spawns an actor for it. Calls that are
//! still allowed go to a running instance if there is one; otherwise they are answered
//! as an empty pool or an unowned lock would answer them.

pub mod error;
pub mod store;

pub use error::*;
pub use store::*;

use crate::clients::{LockClient, LockDirectory, SeatClient, SeatDirectory};
use crate::model::{
    AdmitResult, BroadcastLock, ClaimResult, EventId, EventInfo, EventRecord,
    LeaseHeartbeatResult, LeaveResult, LockPolicy, ReleaseResult, SeatHeartbeatResult, SeatPool,
    StatsResult, StatusResult,
};
use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Which of the event's keys a caller must present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Viewer,
    Broadcaster,
}

#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn EventStore>,
    seats: SeatDirectory,
    locks: LockDirectory,
}

impl Gateway {
    pub fn new(store: Arc<dyn EventStore>, seats: SeatDirectory, locks: LockDirectory) -> Self {
        Self {
            store,
            seats,
            locks,
        }
    }

    /// Loads the record and checks the key, then (for admission) expiry and payment.
    async fn authorize(
        &self,
        event_id: &EventId,
        key: &str,
        role: Role,
        admission: bool,
    ) -> Result<EventRecord, GatewayError> {
        let record = self
            .store
            .get_event(event_id)
            .await?
            .ok_or_else(|| GatewayError::NotFound(event_id.clone()))?;

        let expected = match role {
            Role::Viewer => &record.secret_key,
            Role::Broadcaster => &record.broadcast_key,
        };
        if key.is_empty() || !constant_time_eq(key.as_bytes(), expected.as_bytes()) {
            warn!(%event_id, ?role, "Rejected key");
            return Err(GatewayError::Unauthorized);
        }

        if admission {
            if record.is_expired(Utc::now()) {
                return Err(GatewayError::Expired(event_id.clone()));
            }
            if !record.is_paid() {
                return Err(GatewayError::NotPaid(event_id.clone()));
            }
        }
        Ok(record)
    }

    /// The pool to forward to. An expired event only reaches a pool that is still running.
    async fn seat_pool(&self, record: &EventRecord) -> Result<Option<SeatClient>, GatewayError> {
        if record.is_expired(Utc::now()) {
            let pool = self.seats.existing(&record.id).await?;
            if pool.is_none() {
                debug!(event_id = %record.id, "No seat pool for expired event");
            }
            return Ok(pool);
        }
        Ok(Some(self.seats.for_event(&record.id).await?))
    }

    /// The lock to forward to. An expired event only reaches a lock that is still running.
    async fn lock(&self, record: &EventRecord) -> Result<Option<LockClient>, GatewayError> {
        if record.is_expired(Utc::now()) {
            let lock = self.locks.existing(&record.id).await?;
            if lock.is_none() {
                debug!(event_id = %record.id, "No broadcast lock for expired event");
            }
            return Ok(lock);
        }
        Ok(Some(self.locks.for_event(&record.id).await?))
    }

    /// Public details of an event, for the watch page.
    #[instrument(skip(self, key))]
    pub async fn event_info(&self, event_id: &EventId, key: &str) -> Result<EventInfo, GatewayError> {
        let record = self.authorize(event_id, key, Role::Viewer, false).await?;
        Ok(record.info(Utc::now()))
    }

    #[instrument(skip(self, key))]
    pub async fn view_session(
        &self,
        event_id: &EventId,
        key: &str,
    ) -> Result<AdmitResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Viewer, true).await?;
        let seats = self.seats.for_event(event_id).await?;
        Ok(seats.admit(record.viewer_limit).await?)
    }

    #[instrument(skip(self, key))]
    pub async fn viewer_heartbeat(
        &self,
        event_id: &EventId,
        key: &str,
        session_id: &str,
    ) -> Result<SeatHeartbeatResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Viewer, false).await?;
        let limit = record.viewer_limit;
        match self.seat_pool(&record).await? {
            Some(pool) => Ok(pool.heartbeat(session_id.to_string(), limit).await?),
            None => Ok(SeatPool::default().heartbeat(session_id, limit, Instant::now())),
        }
    }

    #[instrument(skip(self, key))]
    pub async fn leave(
        &self,
        event_id: &EventId,
        key: &str,
        session_id: &str,
    ) -> Result<LeaveResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Viewer, false).await?;
        let limit = record.viewer_limit;
        match self.seat_pool(&record).await? {
            Some(pool) => Ok(pool.leave(session_id.to_string(), limit).await?),
            None => Ok(SeatPool::default().leave(session_id, limit)),
        }
    }

    #[instrument(skip(self, key))]
    pub async fn stats(&self, event_id: &EventId, key: &str) -> Result<StatsResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Viewer, false).await?;
        let limit = record.viewer_limit;
        match self.seat_pool(&record).await? {
            Some(pool) => Ok(pool.stats(limit).await?),
            None => Ok(SeatPool::default().stats(limit)),
        }
    }

    #[instrument(skip(self, key))]
    pub async fn claim_broadcast(
        &self,
        event_id: &EventId,
        key: &str,
    ) -> Result<ClaimResult, GatewayError> {
        self.authorize(event_id, key, Role::Broadcaster, true).await?;
        let lock = self.locks.for_event(event_id).await?;
        Ok(lock.claim().await?)
    }

    #[instrument(skip(self, key))]
    pub async fn broadcast_heartbeat(
        &self,
        event_id: &EventId,
        key: &str,
        lease_id: &str,
    ) -> Result<LeaseHeartbeatResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Broadcaster, false).await?;
        match self.lock(&record).await? {
            Some(lock) => Ok(lock.heartbeat(lease_id.to_string()).await?),
            None => Ok(BroadcastLock::default().heartbeat(
                lease_id,
                Instant::now(),
                LockPolicy::default().ttl,
            )),
        }
    }

    #[instrument(skip(self, key))]
    pub async fn release_broadcast(
        &self,
        event_id: &EventId,
        key: &str,
        lease_id: &str,
    ) -> Result<ReleaseResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Broadcaster, false).await?;
        match self.lock(&record).await? {
            Some(lock) => Ok(lock.release(lease_id.to_string()).await?),
            None => Ok(BroadcastLock::default().release(lease_id)),
        }
    }

    #[instrument(skip(self, key))]
    pub async fn broadcast_status(
        &self,
        event_id: &EventId,
        key: &str,
    ) -> Result<StatusResult, GatewayError> {
        let record = self.authorize(event_id, key, Role::Broadcaster, false).await?;
        match self.lock(&record).await? {
            Some(lock) => Ok(lock.status().await?),
            None => Ok(BroadcastLock::default().status(Instant::now(), LockPolicy::default().ttl)),
        }
    }

    /// Drops both actor instances of an event. Returns `true` if either was running.
    #[instrument(skip(self))]
    pub async fn retire_event(&self, event_id: &EventId) -> Result<bool, GatewayError> {
        let seats = self.seats.retire(event_id).await?;
        let lock = self.locks.retire(event_id).await?;
        if seats || lock {
            info!(%event_id, "Retired event actors");
        }
        Ok(seats || lock)
    }

    /// Marks events whose paid window ended as expired and retires their actors.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> Result<Vec<EventId>, GatewayError> {
        let expired = self.store.expire_due(now).await?;
        for event_id in &expired {
            self.retire_event(event_id).await?;
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "Expired events swept");
        }
        Ok(expired)
    }
}

//! # Seat Client
//!
//! High-level API for one event's seat pool, plus [`SeatDirectory`] to look pools up by
//! event id.
use crate::model::{AdmitResult, EventId, LeaveResult, SeatHeartbeatResult, SeatPool, StatsResult};
use crate::seat_actor::{SeatAction, SeatActionResult, SeatError};
use actor_runtime::{ActorClient, FrameworkError, RegistryClient, ResourceClient};
use async_trait::async_trait;
use tracing::instrument;

/// Client for one event's seat pool.
#[derive(Debug, Clone)]
pub struct SeatClient {
    inner: ResourceClient<SeatPool>,
}

#[async_trait]
impl ActorClient<SeatPool> for SeatClient {
    type Error = SeatError;

    fn inner(&self) -> &ResourceClient<SeatPool> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SeatError::ActorCommunicationError(e.to_string())
    }
}

impl SeatClient {
    pub fn new(inner: ResourceClient<SeatPool>) -> Self {
        Self { inner }
    }

    /// Ask for a seat under `limit`. A full pool is `Ok` with `granted: false`.
    #[instrument(skip(self))]
    pub async fn admit(&self, limit: u32) -> Result<AdmitResult, SeatError> {
        match self.dispatch(SeatAction::Admit { limit }).await? {
            SeatActionResult::Admit(result) => Ok(result),
            _ => Err(SeatError::UnexpectedReply("admit")),
        }
    }

    #[instrument(skip(self))]
    pub async fn heartbeat(
        &self,
        session_id: String,
        limit: u32,
    ) -> Result<SeatHeartbeatResult, SeatError> {
        match self
            .dispatch(SeatAction::Heartbeat { session_id, limit })
            .await?
        {
            SeatActionResult::Heartbeat(result) => Ok(result),
            _ => Err(SeatError::UnexpectedReply("heartbeat")),
        }
    }

    #[instrument(skip(self))]
    pub async fn leave(&self, session_id: String, limit: u32) -> Result<LeaveResult, SeatError> {
        match self.dispatch(SeatAction::Leave { session_id, limit }).await? {
            SeatActionResult::Leave(result) => Ok(result),
            _ => Err(SeatError::UnexpectedReply("leave")),
        }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, limit: u32) -> Result<StatsResult, SeatError> {
        match self.dispatch(SeatAction::Stats { limit }).await? {
            SeatActionResult::Stats(result) => Ok(result),
            _ => Err(SeatError::UnexpectedReply("stats")),
        }
    }
}

/// Finds the seat pool of an event, spawning it on first use.
#[derive(Debug, Clone)]
pub struct SeatDirectory {
    registry: RegistryClient<SeatPool>,
}

impl SeatDirectory {
    pub fn new(registry: RegistryClient<SeatPool>) -> Self {
        Self { registry }
    }

    pub async fn for_event(&self, event_id: &EventId) -> Result<SeatClient, SeatError> {
        let inner = self.registry.resolve(event_id.clone()).await?;
        Ok(SeatClient::new(inner))
    }

    /// Returns the client only if the event's actor is already running.
    pub async fn existing(&self, event_id: &EventId) -> Result<Option<SeatClient>, SeatError> {
        let inner = self.registry.lookup(event_id.clone()).await?;
        Ok(inner.map(SeatClient::new))
    }

    /// Drops the pool of an event. Returns `false` if none was running.
    pub async fn retire(&self, event_id: &EventId) -> Result<bool, SeatError> {
        Ok(self.registry.retire(event_id.clone()).await?)
    }

    /// Number of pools currently running.
    pub async fn instance_count(&self) -> Result<usize, SeatError> {
        Ok(self.registry.instance_count().await?)
    }
}

//! # Lock Client
//!
//! High-level API for one event's broadcast lock, plus [`LockDirectory`].
use crate::lock_actor::{LockAction, LockActionResult, LockError};
use crate::model::{
    BroadcastLock, ClaimResult, EventId, LeaseHeartbeatResult, ReleaseResult, StatusResult,
};
use actor_runtime::{ActorClient, FrameworkError, RegistryClient, ResourceClient};
use async_trait::async_trait;
use tracing::instrument;

/// Client for one event's broadcast lock.
#[derive(Debug, Clone)]
pub struct LockClient {
    inner: ResourceClient<BroadcastLock>,
}

#[async_trait]
impl ActorClient<BroadcastLock> for LockClient {
    type Error = LockError;

    fn inner(&self) -> &ResourceClient<BroadcastLock> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        LockError::ActorCommunicationError(e.to_string())
    }
}

impl LockClient {
    pub fn new(inner: ResourceClient<BroadcastLock>) -> Self {
        Self { inner }
    }

    /// Take the lock. Always succeeds and evicts any current owner.
    #[instrument(skip(self))]
    pub async fn claim(&self) -> Result<ClaimResult, LockError> {
        match self.dispatch(LockAction::Claim).await? {
            LockActionResult::Claim(result) => Ok(result),
            _ => Err(LockError::UnexpectedReply("claim")),
        }
    }

    #[instrument(skip(self))]
    pub async fn heartbeat(&self, lease_id: String) -> Result<LeaseHeartbeatResult, LockError> {
        match self.dispatch(LockAction::Heartbeat { lease_id }).await? {
            LockActionResult::Heartbeat(result) => Ok(result),
            _ => Err(LockError::UnexpectedReply("heartbeat")),
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, lease_id: String) -> Result<ReleaseResult, LockError> {
        match self.dispatch(LockAction::Release { lease_id }).await? {
            LockActionResult::Release(result) => Ok(result),
            _ => Err(LockError::UnexpectedReply("release")),
        }
    }

    #[instrument(skip(self))]
    pub async fn status(&self) -> Result<StatusResult, LockError> {
        match self.dispatch(LockAction::Status).await? {
            LockActionResult::Status(result) => Ok(result),
            _ => Err(LockError::UnexpectedReply("status")),
        }
    }
}

/// Finds the broadcast lock of an event, spawning it on first use.
#[derive(Debug, Clone)]
pub struct LockDirectory {
    registry: RegistryClient<BroadcastLock>,
}

impl LockDirectory {
    pub fn new(registry: RegistryClient<BroadcastLock>) -> Self {
        Self { registry }
    }

    pub async fn for_event(&self, event_id: &EventId) -> Result<LockClient, LockError> {
        let inner = self.registry.resolve(event_id.clone()).await?;
        Ok(LockClient::new(inner))
    }

    /// Returns the client only if the event's actor is already running.
    pub async fn existing(&self, event_id: &EventId) -> Result<Option<LockClient>, LockError> {
        let inner = self.registry.lookup(event_id.clone()).await?;
        Ok(inner.map(LockClient::new))
    }

    pub async fn retire(&self, event_id: &EventId) -> Result<bool, LockError> {
        Ok(self.registry.retire(event_id.clone()).await?)
    }

    pub async fn instance_count(&self) -> Result<usize, LockError> {
        Ok(self.registry.instance_count().await?)
    }
}

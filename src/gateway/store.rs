//! Read access to event records.
//!
//! The gateway only ever reads a record to authorize a request; the actors never see the
//! store at all.

use crate::config::Config;
use crate::model::{EventId, EventRecord, EventStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Event store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn get_event(&self, id: &EventId) -> Result<Option<EventRecord>, StoreError>;

    /// Marks every record whose `expires_at` has passed as expired and returns their ids.
    /// Records already expired are not returned again.
    async fn expire_due(&self, now: DateTime<Utc>) -> Result<Vec<EventId>, StoreError>;
}

/// Process-local store, used by the demo binary and the tests.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, EventRecord>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pending event with fresh keys. Without an explicit `viewer_limit` the
    /// event gets `config.default_viewer_limit`.
    pub async fn create(
        &self,
        title: impl Into<String>,
        viewer_limit: Option<u32>,
        config: &Config,
    ) -> EventRecord {
        let record = EventRecord::new(
            format!("evt_{}", Uuid::new_v4().simple()),
            title,
            viewer_limit.unwrap_or(config.default_viewer_limit),
            Uuid::new_v4().simple().to_string(),
            Uuid::new_v4().simple().to_string(),
        );
        info!(event_id = %record.id, viewer_limit = record.viewer_limit, "Event created");
        self.insert(record.clone()).await;
        record
    }

    /// Inserts or replaces a record.
    pub async fn insert(&self, record: EventRecord) {
        self.events.write().await.insert(record.id.clone(), record);
    }

    /// Marks an event paid. Expired events stay expired. Returns `false` if nothing changed.
    pub async fn mark_paid(&self, id: &EventId) -> bool {
        let mut events = self.events.write().await;
        match events.get_mut(id) {
            Some(record) if record.status == EventStatus::Pending => {
                record.status = EventStatus::Paid;
                info!(event_id = %id, "Event paid");
                true
            }
            _ => false,
        }
    }

    pub async fn mark_expired(&self, id: &EventId) -> bool {
        let mut events = self.events.write().await;
        match events.get_mut(id) {
            Some(record) if record.status != EventStatus::Expired => {
                record.status = EventStatus::Expired;
                true
            }
            _ => false,
        }
    }

    /// Sets the end of an event's paid window.
    pub async fn set_expires_at(&self, id: &EventId, at: DateTime<Utc>) -> bool {
        match self.events.write().await.get_mut(id) {
            Some(record) => {
                record.expires_at = Some(at);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn get_event(&self, id: &EventId) -> Result<Option<EventRecord>, StoreError> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn expire_due(&self, now: DateTime<Utc>) -> Result<Vec<EventId>, StoreError> {
        let mut events = self.events.write().await;
        let mut expired = Vec::new();
        for record in events.values_mut() {
            if record.status != EventStatus::Expired && record.expires_at.is_some_and(|at| at < now)
            {
                record.status = EventStatus::Expired;
                expired.push(record.id.clone());
            }
        }
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(id: &str) -> EventRecord {
        EventRecord::new(id, "Demo", 10, "sk", "bk")
    }

    #[tokio::test]
    async fn test_get_missing_event() {
        let store = InMemoryEventStore::new();
        assert_eq!(store.get_event(&EventId::from("nope")).await, Ok(None));
    }

    #[tokio::test]
    async fn test_create_falls_back_to_default_viewer_limit() {
        let store = InMemoryEventStore::new();
        let config = Config {
            default_viewer_limit: 75,
            ..Config::default()
        };

        let fallback = store.create("Open mic", None, &config).await;
        assert_eq!(fallback.viewer_limit, 75);
        assert_eq!(fallback.status, EventStatus::Pending);
        assert_ne!(fallback.secret_key, fallback.broadcast_key);

        let explicit = store.create("Keynote", Some(8), &config).await;
        assert_eq!(explicit.viewer_limit, 8);
        assert_ne!(explicit.id, fallback.id);

        let stored = store.get_event(&fallback.id).await.unwrap().unwrap();
        assert_eq!(stored, fallback);
    }

    #[tokio::test]
    async fn test_expired_event_cannot_be_paid() {
        let store = InMemoryEventStore::new();
        let id = EventId::from("evt_1");
        store.insert(record("evt_1")).await;

        assert!(store.mark_expired(&id).await);
        assert!(!store.mark_paid(&id).await);
        let got = store.get_event(&id).await.unwrap().unwrap();
        assert_eq!(got.status, EventStatus::Expired);
    }

    #[tokio::test]
    async fn test_expire_due_only_returns_newly_expired() {
        let store = InMemoryEventStore::new();
        let now = Utc::now();
        store.insert(record("past")).await;
        store.insert(record("future")).await;
        store.insert(record("open")).await;
        store
            .set_expires_at(&EventId::from("past"), now - Duration::minutes(1))
            .await;
        store
            .set_expires_at(&EventId::from("future"), now + Duration::hours(1))
            .await;

        assert_eq!(store.expire_due(now).await, Ok(vec![EventId::from("past")]));
        assert_eq!(store.expire_due(now).await, Ok(vec![]));
    }
}

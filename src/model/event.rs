//! The event record, as read from the event store.
//!
//! The coordination actors never see this type. The gateway uses it to authorize callers
//! and to pick the viewer limit before forwarding a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for events. Also the key of both per-event actors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payment lifecycle of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Pending,
    Paid,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    /// Capacity ceiling handed to the seat pool on every admit/stats call.
    pub viewer_limit: u32,
    pub status: EventStatus,
    pub expires_at: Option<DateTime<Utc>>,
    /// Key embedded in watch links.
    pub secret_key: String,
    /// Key embedded in broadcast links.
    pub broadcast_key: String,
}

impl EventRecord {
    /// Creates a pending event with no expiry.
    pub fn new(
        id: impl Into<EventId>,
        title: impl Into<String>,
        viewer_limit: u32,
        secret_key: impl Into<String>,
        broadcast_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            viewer_limit,
            status: EventStatus::Pending,
            expires_at: None,
            secret_key: secret_key.into(),
            broadcast_key: broadcast_key.into(),
        }
    }

    /// An event is expired once marked so, or once its paid window has run out.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == EventStatus::Expired || self.expires_at.is_some_and(|at| at < now)
    }

    pub fn is_paid(&self) -> bool {
        self.status == EventStatus::Paid
    }

    /// The parts of the record a key holder may see. Keys are never included.
    pub fn info(&self, now: DateTime<Utc>) -> EventInfo {
        EventInfo {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status,
            expired: self.is_expired(now),
        }
    }
}

/// Public view of an event, as shown on the watch page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub id: EventId,
    pub title: String,
    pub status: EventStatus,
    pub expired: bool,
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a heartbeat was refused. Carried inside results, never raised as an error: the
/// caller is expected to re-acquire (admit again, or claim again).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The seat session id is unknown, empty, or was pruned.
    InvalidSession,
    /// No lease id was presented.
    MissingSession,
    /// The broadcast lock has no live owner. Claim again.
    StaleLock,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::InvalidSession => "invalid_session",
            FailureReason::MissingSession => "missing_session",
            FailureReason::StaleLock => "stale_lock",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Operations understood by a seat pool.
//!
//! The limit travels with every request: the pool does not store a capacity policy, the
//! caller supplies the current `viewer_limit` each time.

use crate::model::{AdmitResult, LeaveResult, SeatHeartbeatResult, StatsResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatAction {
    /// Ask for a seat. Granted only while `active < limit`.
    Admit { limit: u32 },
    /// Keep a session alive. The limit is only echoed back.
    Heartbeat { session_id: String, limit: u32 },
    /// Give a seat back. Unknown ids are ignored.
    Leave { session_id: String, limit: u32 },
    /// Read occupancy.
    Stats { limit: u32 },
}

/// Results from SeatActions - variants match 1:1 with SeatAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatActionResult {
    Admit(AdmitResult),
    Heartbeat(SeatHeartbeatResult),
    Leave(LeaveResult),
    Stats(StatsResult),
}

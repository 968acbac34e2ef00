//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. Module paths are
//! hidden (`with_target(false)`); the instance name on the `actor` span (for example
//! `seats:evt_42` or `lock:evt_42`) says where a line came from.
//!
//! ## Filter
//!
//! The filter comes from [`Config::log_filter`](crate::config::Config::log_filter), which
//! reads `LOG_FILTER` and falls back to `RUST_LOG`.
//!
//! ```bash
//! # Admissions, takeovers, prunes, releases
//! LOG_FILTER=info cargo run
//!
//! # Every action and result, as seen by the actor loop
//! LOG_FILTER=debug cargo run
//!
//! # Only the lock actors
//! LOG_FILTER=info,live_gate::lock_actor=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: instance start and shutdown, registry spawn and retire
//! - **Seat pools**: admissions, full pools, leaves, pruned silent sessions
//! - **Broadcast locks**: claims, takeovers, releases, heartbeats on a stale lock
//! - **Gateway**: rejected keys, retired and swept events
//!
//! With `info` a viewer joining a full event looks like:
//!
//! ```text
//! INFO actor{instance=seats:evt_demo}: Seat pool full active=2 limit=2
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .compact()
        .init();
}

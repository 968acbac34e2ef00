//! Service configuration.
//!
//! Loaded from environment variables, with defaults for everything. Timeouts are whole
//! seconds.

use std::collections::HashMap;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default viewer heartbeat timeout in seconds.
pub const DEFAULT_SEAT_HEARTBEAT_TIMEOUT_SECS: u64 = 45;

/// Default broadcast lock TTL in seconds. Shorter than the viewer timeout: a dropped
/// publisher should free the lock before a dropped viewer frees a seat.
pub const DEFAULT_BROADCAST_LOCK_TTL_SECS: u64 = 25;

/// Default mailbox size for registries and actor instances.
pub const DEFAULT_ACTOR_MAILBOX_SIZE: usize = 32;

/// Viewer limit used for new event records that don't carry one.
pub const DEFAULT_VIEWER_LIMIT: u32 = 150;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long a viewer session survives without a heartbeat.
    pub seat_heartbeat_timeout: Duration,

    /// How long the broadcast lock survives without an owner heartbeat.
    pub broadcast_lock_ttl: Duration,

    /// Channel capacity for every registry and actor instance.
    pub actor_mailbox_size: usize,

    /// Fallback viewer limit for events created without one.
    pub default_viewer_limit: u32,

    /// `tracing` filter directive (e.g. `info`, `live_gate=debug`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seat_heartbeat_timeout: Duration::from_secs(DEFAULT_SEAT_HEARTBEAT_TIMEOUT_SECS),
            broadcast_lock_ttl: Duration::from_secs(DEFAULT_BROADCAST_LOCK_TTL_SECS),
            actor_mailbox_size: DEFAULT_ACTOR_MAILBOX_SIZE,
            default_viewer_limit: DEFAULT_VIEWER_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },

    #[error("{0} must be greater than zero")]
    Zero(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    ///
    /// Recognized keys: `SEAT_HEARTBEAT_TIMEOUT_SECS`, `BROADCAST_LOCK_TTL_SECS`,
    /// `ACTOR_MAILBOX_SIZE`, `DEFAULT_VIEWER_LIMIT`, `LOG_FILTER` (falls back to
    /// `RUST_LOG`).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seat_secs = parse_positive(
            vars,
            "SEAT_HEARTBEAT_TIMEOUT_SECS",
            DEFAULT_SEAT_HEARTBEAT_TIMEOUT_SECS,
        )?;
        let lock_secs =
            parse_positive(vars, "BROADCAST_LOCK_TTL_SECS", DEFAULT_BROADCAST_LOCK_TTL_SECS)?;
        let mailbox = parse_positive(vars, "ACTOR_MAILBOX_SIZE", DEFAULT_ACTOR_MAILBOX_SIZE)?;
        // A limit of zero is legal: the event simply admits nobody.
        let viewer_limit = parse(vars, "DEFAULT_VIEWER_LIMIT", DEFAULT_VIEWER_LIMIT)?;

        let log_filter = vars
            .get("LOG_FILTER")
            .or_else(|| vars.get("RUST_LOG"))
            .cloned()
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            seat_heartbeat_timeout: Duration::from_secs(seat_secs),
            broadcast_lock_ttl: Duration::from_secs(lock_secs),
            actor_mailbox_size: mailbox,
            default_viewer_limit: viewer_limit,
            log_filter,
        })
    }
}

fn parse<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.clone(),
        }),
    }
}

fn parse_positive<T>(
    vars: &HashMap<String, String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let value = parse(vars, name, default)?;
    if value == T::default() {
        return Err(ConfigError::Zero(name.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.seat_heartbeat_timeout, Duration::from_secs(45));
        assert_eq!(config.broadcast_lock_ttl, Duration::from_secs(25));
        assert_eq!(config.actor_mailbox_size, 32);
        assert_eq!(config.default_viewer_limit, 150);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(&vars(&[
            ("SEAT_HEARTBEAT_TIMEOUT_SECS", "60"),
            ("BROADCAST_LOCK_TTL_SECS", " 10 "),
            ("ACTOR_MAILBOX_SIZE", "128"),
            ("DEFAULT_VIEWER_LIMIT", "0"),
            ("RUST_LOG", "live_gate=debug"),
        ]))
        .unwrap();
        assert_eq!(config.seat_heartbeat_timeout, Duration::from_secs(60));
        assert_eq!(config.broadcast_lock_ttl, Duration::from_secs(10));
        assert_eq!(config.actor_mailbox_size, 128);
        assert_eq!(config.default_viewer_limit, 0);
        assert_eq!(config.log_filter, "live_gate=debug");
    }

    #[test]
    fn test_log_filter_takes_precedence_over_rust_log() {
        let config =
            Config::from_vars(&vars(&[("LOG_FILTER", "warn"), ("RUST_LOG", "trace")])).unwrap();
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = Config::from_vars(&vars(&[("BROADCAST_LOCK_TTL_SECS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "BROADCAST_LOCK_TTL_SECS".to_string(),
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Config::from_vars(&vars(&[("SEAT_HEARTBEAT_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::Zero("SEAT_HEARTBEAT_TIMEOUT_SECS".to_string()));
    }
}

//! Server configuration

use chrono::TimeDelta;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_IDLE_SECS: u64 = 4 * 60 * 60;
const DEFAULT_LOG_FILTER: &str = "offer_board_rust=info,tower_http=info";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (env: OFFER_BOARD_HOST)
    pub host: IpAddr,
    /// Bind port (env: OFFER_BOARD_PORT)
    pub port: u16,
    /// tracing filter directive (env: RUST_LOG)
    pub log_filter: String,
    /// Idle time after which a session is dropped, in seconds; 0 keeps
    /// sessions until they are ended (env: OFFER_BOARD_SESSION_IDLE_SECS)
    pub session_idle_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; used by `from_env` and tests
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = match lookup("OFFER_BOARD_HOST").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid OFFER_BOARD_HOST, using default");
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match lookup("OFFER_BOARD_PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid OFFER_BOARD_PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        let session_idle_secs = match lookup("OFFER_BOARD_SESSION_IDLE_SECS").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid OFFER_BOARD_SESSION_IDLE_SECS, using default");
                defaults.session_idle_secs
            }),
            None => defaults.session_idle_secs,
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_filter);

        Self {
            host,
            port,
            log_filter,
            session_idle_secs,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Idle timeout for sessions, or `None` when expiry is disabled
    pub fn session_idle_timeout(&self) -> Option<TimeDelta> {
        if self.session_idle_secs == 0 {
            return None;
        }
        i64::try_from(self.session_idle_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
    }
}

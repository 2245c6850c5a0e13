//! Configuration schema definitions.
//!
//! Non-secret settings derive Serde traits so they can be read from an
//! optional TOML file. The two secrets (`PROXY_TOKEN`, `PROXY_URL`) are
//! never part of the file and are carried separately in [`RelayConfig`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::routing::ProxyTemplate;
use crate::security::ProxyToken;

/// Fully loaded, immutable relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared secret callers present in `x-proxy-token`.
    pub token: ProxyToken,

    /// Upstream proxy URL template containing `{sessionId}`.
    pub proxy_template: ProxyTemplate,

    /// Everything else.
    pub settings: RelaySettings,
}

/// Tunable settings, all with defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelaySettings {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Outbound (proxied) request settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Largest accepted inbound envelope in bytes.
    pub max_body_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_body_size: 10 * 1024 * 1024,
        }
    }
}

/// Timeouts applied to every forwarded request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Time allowed to reach the proxy, in seconds.
    pub connect_timeout_secs: u64,

    /// Total time allowed for the upstream exchange, body included, in seconds.
    pub request_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

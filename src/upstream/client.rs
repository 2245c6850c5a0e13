//! Per-session HTTP client construction.

use reqwest::{Client, Proxy};

use crate::config::UpstreamConfig;
use crate::routing::ProxyEndpoint;
use crate::upstream::UpstreamError;

/// Builds a client that tunnels every request through one proxy endpoint.
///
/// A fresh client is built per request since the proxy differs per session;
/// nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    config: UpstreamConfig,
}

impl ClientFactory {
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    pub fn build(&self, endpoint: &ProxyEndpoint) -> Result<Client, UpstreamError> {
        let proxy = Proxy::all(endpoint.as_str()).map_err(UpstreamError::InvalidProxy)?;

        Client::builder()
            .proxy(proxy)
            .connect_timeout(self.config.connect_timeout())
            .timeout(self.config.request_timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(UpstreamError::ClientBuild)
    }
}

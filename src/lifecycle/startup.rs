//! Startup orchestration.
//!
//! # Responsibilities
//! - Report the effective configuration
//! - Bind the listener and serve until shutdown
//!
//! Configuration loading happens before this point; a relay is never
//! started with a missing token or template.

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::routing::SESSION_PLACEHOLDER;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind the configured address and serve until `shutdown` triggers.
pub async fn run(config: RelayConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let settings = &config.settings;
    tracing::info!(
        bind_address = %settings.listener.bind_address,
        max_body_size = settings.listener.max_body_size,
        connect_timeout_secs = settings.upstream.connect_timeout_secs,
        request_timeout_secs = settings.upstream.request_timeout_secs,
        "Configuration loaded"
    );
    if !config.proxy_template.has_placeholder() {
        tracing::warn!(
            placeholder = SESSION_PLACEHOLDER,
            "PROXY_URL has no session placeholder; every session shares one proxy"
        );
    }

    let address = settings.listener.bind_address.clone();
    let bound = TcpListener::bind(&address).await;
    let listener = bound.map_err(|source| StartupError::Bind { address, source })?;

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

//! Outbound forwarding through the session proxy.
//!
//! # Data Flow
//! ```text
//! ForwardRequest + ProxyEndpoint
//!     → client.rs (build a proxied reqwest client)
//!     → forwarder.rs (send, await, buffer body)
//!     → ForwardResponse | UpstreamError
//! ```
//!
//! # Design Decisions
//! - Every call has a deadline (connect + total request timeout)
//! - Timeouts are distinct from other failures and map to 504
//! - No retries at any layer

pub mod client;
pub mod forwarder;

use axum::http::StatusCode;
use thiserror::Error;

pub use client::ClientFactory;
pub use forwarder::Forwarder;

/// Failure to obtain a response from upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("proxy endpoint is not usable: {0}")]
    InvalidProxy(#[source] reqwest::Error),

    #[error("failed to build upstream client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to connect through proxy: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("upstream timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("upstream request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to read upstream body: {0}")]
    Body(#[source] reqwest::Error),
}

impl UpstreamError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Request(err)
        }
    }

    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Body(err)
        }
    }

    /// Short machine-readable tag, safe to show callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidProxy(_) => "invalid_proxy",
            Self::ClientBuild(_) => "client",
            Self::Connect(_) => "connect",
            Self::Timeout(_) => "timeout",
            Self::Request(_) => "request",
            Self::Body(_) => "body",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

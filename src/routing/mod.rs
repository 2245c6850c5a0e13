//! Upstream proxy routing.
//!
//! # Data Flow
//! ```text
//! validated sessionId
//!     → template.rs (substitute into PROXY_URL)
//!     → ProxyEndpoint
//!     → upstream client factory
//! ```
//!
//! There is no routing table: the session id alone picks the tunnel.

pub mod template;

pub use template::{ProxyEndpoint, ProxyTemplate, SESSION_PLACEHOLDER};

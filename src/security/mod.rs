//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (already schema-validated):
//!     → auth.rs (constant-time x-proxy-token check)
//!     → Pass to routing
//!
//! Upstream response:
//!     → headers.rs (strip hop-by-hop, flatten duplicates)
//!     → Relay to caller
//! ```
//!
//! # Design Decisions
//! - Fail closed: any token problem yields the same 403 body
//! - The token is never logged or echoed

pub mod auth;
pub mod headers;

pub use auth::{AuthError, ProxyToken, DENIED_CODE, DENIED_MESSAGE, TOKEN_HEADER};

//! Observability subsystem.
//!
//! Logging only: the forwarding path emits one `info` event per relayed
//! request (the resolved proxy, password redacted) plus debug/warn events
//! for rejections and upstream failures. `tower_http::trace` adds request
//! spans keyed by `x-request-id`.

pub mod logging;

pub use logging::init_logging;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! POST /proxy
//!     → server.rs (Axum setup, middleware, handler)
//!     → request.rs (parse & validate the envelope)
//!     → [security::auth checks x-proxy-token]
//!     → [routing resolves the session proxy]
//!     → [upstream forwards and buffers]
//!     → response.rs (relay status, headers, body)
//!     → error.rs (any failure becomes a terminated response)
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod server;

pub use error::RelayError;
pub use request::{FieldError, ForwardMethod, ForwardRequest, ValidationErrors};
pub use response::ForwardResponse;
pub use server::{AppState, HttpServer, X_REQUEST_ID};

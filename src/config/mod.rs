//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment (PROXY_TOKEN, PROXY_URL, RELAY_*)
//!     + optional TOML file (RELAY_CONFIG)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the request handler
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and never changes
//! - Any loading failure is fatal; the process exits before binding
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{MapEnv, ReadEnv, SystemEnv};
pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RelayConfig, RelaySettings, UpstreamConfig};

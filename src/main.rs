//! maze-relay: authenticated HTTP forwarding relay.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────────┐
//!                  │                     MAZE RELAY                       │
//!  POST /proxy     │  ┌──────────┐   ┌──────────┐   ┌──────────┐          │
//!  ────────────────┼─▶│ request  │──▶│ security │──▶│ routing  │          │
//!                  │  │ validate │   │   auth   │   │ template │          │
//!                  │  └──────────┘   └──────────┘   └────┬─────┘          │
//!                  │                                     ▼                │
//!                  │  ┌──────────┐                  ┌──────────┐          │   session
//!  ◀───────────────┼──│ response │◀─────────────────│ upstream │◀─────────┼── proxy ── target
//!   status/headers │  │  relay   │                  │ forwarder│          │
//!   /raw body      │  └──────────┘                  └──────────┘          │
//!                  └──────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use maze_relay::config::{load_config, SystemEnv};
use maze_relay::lifecycle::{self, signals, Shutdown};
use maze_relay::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config(&SystemEnv) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("maze-relay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.settings.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "maze-relay starting");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    match lifecycle::run(config, shutdown).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "maze-relay stopped");
            ExitCode::FAILURE
        }
    }
}

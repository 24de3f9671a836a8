//! blpq-tools: shared plumbing for the query tools
//!
//! Each binary parses its flags, loads `Configuration.json`, opens a
//! session and a service, sends one request, and drains the event
//! stream until the final response (or session termination) arrives.

pub mod cli;
pub mod output;
pub mod runner;

pub use runner::{drain_responses, LoopOutcome};

/// Install the fmt subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

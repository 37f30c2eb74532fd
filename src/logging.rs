//! Logging setup
//!
//! `tracing` events go to stderr so stdout carries only the conversation.
//! `RUST_LOG` takes precedence over the CLI verbosity.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Filter for the given verbosity, honouring `RUST_LOG` when set
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

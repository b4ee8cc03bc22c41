// src/logging.rs
// =============================================================================
// Tracing setup for the repo-scout binary.
//
// Usage:
//   repo-scout --debug ...                 # debug logging to stderr
//   RUST_LOG=repo_scout=debug repo-scout   # fine-grained control
//
// Logs go to stderr so table/JSON output on stdout stays clean.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the fmt subscriber.
///
/// Without `RUST_LOG` the level is `warn`, or `debug` when `debug` is set.
pub fn init_tracing(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

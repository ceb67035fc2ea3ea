//! Tracing subscriber for the `gp` binary: compact, no ANSI, on stderr so
//! stdout stays clean JSON.
//!
//! A bad filter is a usage error and exits like any other bad flag.

use tracing_subscriber::EnvFilter;

use crate::MainError;

/// Install the global subscriber. `RUST_LOG` wins over `level` when it parses.
pub(crate) fn init(level: &str) -> Result<(), MainError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| filter_for(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| MainError::Validation(format!("logging already initialised: {e}")))
}

fn filter_for(level: &str) -> Result<EnvFilter, MainError> {
    EnvFilter::try_new(level)
        .map_err(|e| MainError::Validation(format!("invalid log level/filter '{level}': {e}")))
}

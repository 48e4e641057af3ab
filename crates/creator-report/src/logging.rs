//! Tracing setup. Log lines go to stderr so report output on stdout stays
//! clean for piping.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants;

/// Install the global subscriber. RUST_LOG overrides the level.
pub fn initialize(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        constants::VERBOSE_LOG_LEVEL
    } else {
        constants::DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    Ok(())
}

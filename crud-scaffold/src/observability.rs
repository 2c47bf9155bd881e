//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install the JSON log subscriber
///
/// `service.log_level` accepts a level or a full filter directive
/// (`info,crud_scaffold=debug`); an unparsable value falls back to `info`.
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(config: &Config) -> bool {
    let filter = EnvFilter::try_new(&config.service.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("Tracing initialized for service: {}", config.service.name);
    }
    installed
}

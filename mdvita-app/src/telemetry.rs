//! Log subscriber setup.

use mdvita_core::config::GeneralConfig;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `RUST_LOG` nor the config yields a valid one.
const FALLBACK_FILTER: &str = "info";

/// Build the level filter: `RUST_LOG` wins, then `general.log_level`.
#[must_use]
pub fn env_filter(config: &GeneralConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Install the global `tracing` subscriber. Logs go to stderr, as JSON lines
/// when `general.json_logs` is set.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(config: &GeneralConfig) -> bool {
    let builder = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(config))
        .with_target(false);

    let installed = if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::info!(level = %config.log_level, json = config.json_logs, "Logging initialised");
    }
    installed
}

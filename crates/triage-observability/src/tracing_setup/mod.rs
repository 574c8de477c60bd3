//! Tracing setup: structured JSON logging filtered by environment.

pub mod events;

use tracing_subscriber::EnvFilter;
use triage_core::config::ObservabilityConfig;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "TRIAGE_LOG";

/// Install a JSON subscriber filtered by `TRIAGE_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}

/// Initialize from the `[observability]` section. `TRIAGE_LOG` still wins
/// over the configured level when set.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    }
}

//! Logging initialization.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Builds the level filter. `RUST_LOG` wins over the configured level.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Installs the global subscriber: `json` for machines, anything else for a
/// human-readable pretty format.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let subscriber = tracing_subscriber::registry().with(env_filter(config));

    match config.format.as_str() {
        "json" => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_current_span(true)
                    .with_target(true),
            )
            .try_init(),
        _ => subscriber
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_target(true),
            )
            .try_init(),
    }
}

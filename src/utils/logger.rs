use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber from the logging config.
/// Call once at startup; repeated calls are ignored.
pub fn init_logging(logging_config: &LoggingConfig) {
    // Parse level string -> LevelFilter; unknown strings fall back to info
    // (the session core must never fail fatally over observability).
    let level_filter = match logging_config.level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        other => {
            eprintln!("Unknown logging.level '{}'; using 'info'.", other);
            LevelFilter::INFO
        }
    };

    // Env-based overrides layered on top of the configured default.
    let filter_layer = EnvFilter::default().add_directive(level_filter.into());

    // Route `log` crate records from dependencies into tracing.
    let _ = tracing_log::LogTracer::init();

    let result = match logging_config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().json())
            .try_init(),
        // Human-readable console output; also the fallback for unknown formats
        _ => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().pretty())
            .try_init(),
    };

    if result.is_err() {
        // A subscriber is already installed (e.g. by the test harness).
        tracing::debug!("Logging already initialized; keeping existing subscriber.");
    }
}

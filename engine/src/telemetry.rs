//! Telemetry
//!
//! Structured logging for the orchestrator. Rounds, dispatches, and
//! transport failures all emit `tracing` events; this module wires up the
//! subscriber that renders them. Debug builds print human-readable output
//! for watching a conversation live; release builds emit JSON lines with
//! span context for log ingestion.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber at the given level.
///
/// The level normally comes from `[core] log_level` in the config file or
/// the `--log` flag; a `RUST_LOG` environment variable wins over both.
/// Calling this twice is harmless, the second install is a no-op.
pub fn init_telemetry_with_level(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},rocky_engine={log_level}")));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}

/// Install the global subscriber at "info" for code paths that run before
/// the config file is loaded.
pub fn init_telemetry() {
    init_telemetry_with_level("info");
}

//! Tracing subscriber bootstrap.

use libris_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the level filter: `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.log_level).map_err(|e| {
            anyhow::anyhow!("invalid log level '{}': {}", settings.log_level, e)
        }),
    }
}

/// Install the global tracing subscriber.
///
/// Installing twice is not an error; the first subscriber stays in place.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            target: "libris-telemetry",
            format = ?settings.log_format,
            level = %settings.log_level,
            "telemetry initialized"
        );
    }

    Ok(())
}

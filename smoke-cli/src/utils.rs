//! Tracing setup for the CLI

use anyhow::{anyhow, Result};
use smoke_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Initialize tracing on stderr so stdout stays free for reports
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the configuration.
pub fn init_tracing(config: &LoggingConfig, log_level: Option<&String>) -> Result<()> {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.filter_directives())),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    result.map_err(|e| anyhow!("Failed to initialize tracing: {}", e))
}

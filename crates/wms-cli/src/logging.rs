//! Logging setup for the command line tool
//!
//! Log lines go to stderr so that table and JSON output on stdout stay
//! clean. The filter comes from `WMS_LOG` when set, otherwise from the
//! `log_filter` setting.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "WMS_LOG";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive used when `WMS_LOG` is not set
    pub default_filter: String,

    /// Whether to include file/line information in logs
    pub include_location: bool,
}

impl LoggingConfig {
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            include_location: cfg!(debug_assertions),
        }
    }

    /// Filter to install, `WMS_LOG` taking precedence
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            EnvFilter::try_new(&self.default_filter).unwrap_or_else(|err| {
                eprintln!(
                    "Invalid log filter '{}' ({}), falling back to 'info'",
                    self.default_filter, err
                );
                EnvFilter::new("info")
            })
        })
    }
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(console_layer)
        .try_init()?;

    tracing::debug!(filter = %config.default_filter, "Logging initialized");
    Ok(())
}

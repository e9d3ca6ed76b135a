//! Console logging for the CLI.
//!
//! Logs go to stderr so stdout stays clean for the rendered output.
//! `RUST_LOG` overrides the default level.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Console log level (default: DEBUG in debug builds, WARN otherwise)
    pub console_level: Level,
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::WARN
        };
        Self { console_level }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.console_level = Level::DEBUG;
        }
        self
    }
}

pub fn init(config: TelemetryConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.console_level.as_str().to_lowercase()));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

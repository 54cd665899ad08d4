//! Diagnostic logging setup.
//!
//! All diagnostics go to stderr through `tracing`; stdout is reserved for
//! command output so it can be piped.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` overrides the level; `NO_COLOR` disables ANSI output.
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ansi: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Raise the level to `debug` unless `RUST_LOG` already set one.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose && std::env::var_os("RUST_LOG").is_none() {
            self.log_level = "debug".to_string();
        }
        self
    }

    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(config.filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}

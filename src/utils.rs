//! Utils
//!
//! Command-line arguments and logging setup shared by the demo drivers.

use std::path::PathBuf;

use clap::{Args, Parser};
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::{SubscriberInitExt, TryInitError},
};

/// How cart and checkout events are written to the terminal.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for reading alongside the demo output
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Demo logging flags.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Minimum level or filter directive for demo events, e.g. `feedo=debug`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Event output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Arguments for the ordering demo
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Store configuration file (YAML); built-in defaults are used when omitted
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Payment method for the demo order (card, cash)
    #[clap(short, long, default_value = "card")]
    pub payment: String,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

/// Logging initialisation errors
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Install a global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
///
/// # Errors
///
/// Returns [`LoggingError::Init`] if a subscriber has already been installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true),
        ),
    }
}

fn init_with_layer<L>(config: &LoggingConfig, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

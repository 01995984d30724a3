//! Subscriber setup for the `tracing` events the library emits
//!
//! `RUST_LOG` wins when set; otherwise the filter follows `-q`/`-v`. Log
//! lines always go to stderr so `--json` results on stdout stay parseable.

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Filter directive used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "info,vitrina=debug",
        Verbosity::Debug => "debug",
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}

/// Install the global subscriber
pub fn init(verbosity: Verbosity, format: LogFormat, ansi: bool) -> CliResult<()> {
    let (text, json) = match format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(ansi)
                    .with_target(verbosity.is_verbose()),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(fmt::layer().json().with_writer(std::io::stderr)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(text)
        .with(json)
        .try_init()
        .map_err(|e| CliError::config(format!("failed to install log subscriber: {e}")))
}

//! Vitrina CLI library
//!
//! Command-line runner for the storefront and booking-API scenarios. The
//! binary only injects configuration; all checks live in the `vitrina` crate.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
mod runner;
pub mod scenarios;

pub use commands::{ApiArgs, Cli, ColorArg, Commands, ConfigAction, ConfigArgs, UiArgs, UiScenario};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::LogFormat;
pub use output::{OutputFormat, ProgressReporter};
pub use runner::{ScenarioResult, ScenarioResults, ScenarioRunner};

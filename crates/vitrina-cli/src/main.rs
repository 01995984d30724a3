//! Vitrina CLI: storefront and booking-API scenario runner
//!
//! ## Usage
//!
//! ```bash
//! vitrina api                               # Booking API scenarios
//! vitrina api --base-url http://localhost:3001 --json
//! vitrina ui brand-stock --max-pages 5      # Needs the `browser` feature
//! vitrina config show                       # Effective configuration
//! vitrina config init vitrina.yaml          # Write the defaults
//! ```

use clap::Parser;
use std::process::ExitCode;
use vitrina_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, Commands, OutputFormat, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init(config.verbosity, config.log_format, config.color.should_color())?;
    tracing::debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Api(args) => handlers::run_api(&config, &args),
        #[cfg(feature = "browser")]
        Commands::Ui(args) => handlers::run_ui(&config, &args),
        #[cfg(not(feature = "browser"))]
        Commands::Ui(_) => Err(CliError::invalid_argument(
            "UI scenarios are not enabled. Rebuild with --features browser",
        )),
        Commands::Config(args) => handlers::run_config(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let output = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_output(output)
        .with_log_format(cli.log_format)
        .with_config_path(cli.config.clone())
}

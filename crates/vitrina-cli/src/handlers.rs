//! Subcommand handlers

use crate::commands::{ApiArgs, ConfigAction, ConfigArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use crate::runner::ScenarioRunner;
use crate::scenarios;
use std::path::Path;
use vitrina::config::ms;
use vitrina::{BookingClient, SuiteConfig};

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::config(format!("Failed to create runtime: {e}")))
}

/// `vitrina api`: health first, then the remaining booking scenarios
pub fn run_api(config: &CliConfig, args: &ApiArgs) -> CliResult<()> {
    let mut suite = config.suite_config()?;
    if let Some(url) = &args.base_url {
        suite = suite.with_api_url(url.clone());
    }
    if let Some(max) = args.max_response_ms {
        suite.api.max_response_ms = max;
    }
    suite.validate()?;

    let max = ms(suite.api.max_response_ms);
    let client = BookingClient::new(&suite.api)?;
    let mut runner = ScenarioRunner::new(config);
    runner.header(&format!("Booking API at {}", suite.api.base_url));

    runtime()?.block_on(async {
        if !runner.run("health", scenarios::api::health(&client)).await {
            runner
                .reporter()
                .warning("API is not healthy; skipping the remaining scenarios");
            return;
        }
        runner
            .run("list-bookings", scenarios::api::list_bookings(&client, max))
            .await;
        runner
            .run(
                "search-future-dates",
                scenarios::api::search_future_dates(&client, max),
            )
            .await;
        runner
            .run("round-trip", scenarios::api::round_trip(&client, max))
            .await;
        runner
            .run("token-delete", scenarios::api::token_delete(&client, max))
            .await;
    });

    runner.finish()?.into_outcome()
}

/// `vitrina ui <scenario>`: one storefront scenario in a fresh browser
#[cfg(feature = "browser")]
pub fn run_ui(config: &CliConfig, args: &crate::commands::UiArgs) -> CliResult<()> {
    use crate::commands::UiScenario;
    use scenarios::ui;
    use std::sync::Arc;
    use vitrina::{ChromiumDriver, Session};

    let mut suite = config.suite_config()?;
    if let Some(url) = &args.base_url {
        suite = suite.with_base_url(url.clone());
    }
    if let Some(max_pages) = args.max_pages {
        suite = suite.with_max_pages(max_pages);
    }
    if args.headful {
        suite = suite.with_headless(false);
    }
    suite.validate()?;

    let max_pages = suite.pagination.max_pages;
    let mut runner = ScenarioRunner::new(config);
    runner.header(&format!("Storefront at {}", suite.base_url));

    runtime()?.block_on(async {
        let driver = Arc::new(ChromiumDriver::launch(&suite.browser).await?);
        let session = Session::new(driver.clone(), suite);
        let name = args.scenario.name();
        match args.scenario {
            UiScenario::BrandStock => {
                runner
                    .run(name, ui::brand_stock(&session, args.brand, max_pages))
                    .await
            }
            UiScenario::CategoryKeywords => {
                runner
                    .run(name, ui::category_keywords(&session, args.category, max_pages))
                    .await
            }
            UiScenario::Subcategory => {
                runner
                    .run(name, ui::subcategory(&session, args.subcategory, max_pages))
                    .await
            }
            UiScenario::EcoBadges => runner.run(name, ui::eco_badges(&session, max_pages)).await,
            UiScenario::ProfilePhone => runner.run(name, ui::profile_phone(&session)).await,
            UiScenario::ContactLanguage => {
                runner
                    .run(name, ui::contact_language(&session, args.language))
                    .await
            }
        };
        driver.close().await
    })?;

    runner.finish()?.into_outcome()
}

/// `vitrina config show|init`
pub fn run_config(config: &CliConfig, args: &ConfigArgs) -> CliResult<()> {
    match &args.action {
        ConfigAction::Show => {
            let suite = config.suite_config()?;
            println!("{}", render_config(&suite, config.output)?.trim_end());
            Ok(())
        }
        ConfigAction::Init { path, force } => {
            write_default_config(path, *force)?;
            if !config.verbosity.is_quiet() {
                eprintln!("Wrote default configuration to {}", path.display());
            }
            Ok(())
        }
    }
}

/// YAML, or JSON when `--json` is set
pub fn render_config(suite: &SuiteConfig, format: OutputFormat) -> CliResult<String> {
    Ok(match format {
        OutputFormat::Text => suite.to_yaml()?,
        OutputFormat::Json => serde_json::to_string_pretty(suite)?,
    })
}

/// Write the default configuration, refusing to clobber unless `force`
pub fn write_default_config(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::invalid_argument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    std::fs::write(path, SuiteConfig::default().to_yaml()?)?;
    Ok(())
}

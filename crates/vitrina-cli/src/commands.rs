//! CLI command definitions using clap

use crate::logging::LogFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vitrina::{Brand, Category, Language, Subcategory};

/// Vitrina: storefront and booking-API scenario runner
#[derive(Parser, Debug)]
#[command(name = "vitrina")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (failures only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Suite configuration file (YAML)
    #[arg(long, global = true, env = "VITRINA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Print results as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the booking API scenarios
    Api(ApiArgs),

    /// Run one storefront scenario in Chromium (needs the `browser` feature)
    Ui(UiArgs),

    /// Show or write the suite configuration
    Config(ConfigArgs),
}

/// Arguments for the api command
#[derive(Parser, Debug)]
pub struct ApiArgs {
    /// Booking API base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Response time limit in milliseconds (overrides the config file)
    #[arg(long)]
    pub max_response_ms: Option<u64>,
}

/// Storefront scenario
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiScenario {
    /// Brand filter shows no out-of-stock products
    BrandStock,
    /// Category listing names match the category keywords
    CategoryKeywords,
    /// Subcategory filter results match, or "no results" shows
    Subcategory,
    /// Eco filter shows only eco-badged products
    EcoBadges,
    /// Profile phone number update
    ProfilePhone,
    /// Contact page translations
    ContactLanguage,
}

impl UiScenario {
    /// Kebab-case name, as typed on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BrandStock => "brand-stock",
            Self::CategoryKeywords => "category-keywords",
            Self::Subcategory => "subcategory",
            Self::EcoBadges => "eco-badges",
            Self::ProfilePhone => "profile-phone",
            Self::ContactLanguage => "contact-language",
        }
    }
}

/// Arguments for the ui command
#[derive(Parser, Debug)]
pub struct UiArgs {
    /// Scenario to run
    pub scenario: UiScenario,

    /// Storefront base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Page limit for paginated checks (overrides the config file)
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Brand for brand-stock
    #[arg(long, default_value = "ForgeFlex Tools")]
    pub brand: Brand,

    /// Category for category-keywords
    #[arg(long, default_value = "Hand Tools")]
    pub category: Category,

    /// Subcategory for subcategory
    #[arg(long, default_value = "Hammer")]
    pub subcategory: Subcategory,

    /// Language code for contact-language
    #[arg(long, default_value = "DE")]
    pub language: Language,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as YAML
    Show,

    /// Write the default configuration to a file
    Init {
        /// Destination file
        #[arg(default_value = "vitrina.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_api_command() {
            let cli = Cli::parse_from(["vitrina", "api"]);
            match cli.command {
                Commands::Api(args) => {
                    assert!(args.base_url.is_none());
                    assert!(args.max_response_ms.is_none());
                }
                _ => panic!("expected api command"),
            }
        }

        #[test]
        fn test_api_overrides() {
            let cli = Cli::parse_from([
                "vitrina",
                "api",
                "--base-url",
                "http://127.0.0.1:3001",
                "--max-response-ms",
                "500",
            ]);
            match cli.command {
                Commands::Api(args) => {
                    assert_eq!(args.base_url.as_deref(), Some("http://127.0.0.1:3001"));
                    assert_eq!(args.max_response_ms, Some(500));
                }
                _ => panic!("expected api command"),
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["vitrina", "api", "-vv", "--json", "--log-format", "json"]);
            assert_eq!(cli.verbose, 2);
            assert!(cli.json);
            assert_eq!(cli.log_format, LogFormat::Json);
            assert!(!cli.quiet);
        }

        #[test]
        fn test_config_flag() {
            let cli = Cli::parse_from(["vitrina", "--config", "suite.yaml", "config", "show"]);
            assert_eq!(cli.config, Some(PathBuf::from("suite.yaml")));
            assert!(matches!(
                cli.command,
                Commands::Config(ConfigArgs {
                    action: ConfigAction::Show
                })
            ));
        }

        #[test]
        fn test_config_init_defaults() {
            let cli = Cli::parse_from(["vitrina", "config", "init"]);
            match cli.command {
                Commands::Config(ConfigArgs {
                    action: ConfigAction::Init { path, force },
                }) => {
                    assert_eq!(path, PathBuf::from("vitrina.yaml"));
                    assert!(!force);
                }
                _ => panic!("expected config init"),
            }
        }

        #[test]
        fn test_unknown_subcommand_rejected() {
            assert!(Cli::try_parse_from(["vitrina", "record"]).is_err());
        }
    }

    mod ui_tests {
        use super::*;

        #[test]
        fn test_scenario_names_match_value_names() {
            for scenario in UiScenario::value_variants() {
                let parsed = UiScenario::from_str(scenario.name(), false).unwrap();
                assert_eq!(parsed, *scenario);
            }
        }

        #[test]
        fn test_ui_args_parse_catalog_values() {
            #[derive(Parser)]
            struct Harness {
                #[command(flatten)]
                ui: UiArgs,
            }

            let harness = Harness::parse_from([
                "ui",
                "brand-stock",
                "--brand",
                "mightycraft hardware",
                "--language",
                "fr",
                "--max-pages",
                "3",
                "--headful",
            ]);
            assert_eq!(harness.ui.scenario, UiScenario::BrandStock);
            assert_eq!(harness.ui.brand, Brand::MightyCraftHardware);
            assert_eq!(harness.ui.language, Language::Fr);
            assert_eq!(harness.ui.category, Category::HandTools);
            assert_eq!(harness.ui.subcategory, Subcategory::Hammer);
            assert_eq!(harness.ui.max_pages, Some(3));
            assert!(harness.ui.headful);
        }

        #[test]
        fn test_unknown_brand_rejected() {
            #[derive(Parser)]
            struct Harness {
                #[command(flatten)]
                ui: UiArgs,
            }

            assert!(Harness::try_parse_from(["ui", "brand-stock", "--brand", "Acme"]).is_err());
        }
    }
}

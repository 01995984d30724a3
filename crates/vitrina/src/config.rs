//! Suite configuration
//!
//! Every timeout, retry count and page cap used by pages, components and the
//! traversal engine comes from [`SuiteConfig`]. Nothing is hardcoded at the
//! call site, so a YAML file or `VITRINA_*` environment variables can
//! override any default.

use crate::result::{VitrinaError, VitrinaResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default storefront under test
pub const DEFAULT_BASE_URL: &str = "https://practicesoftwaretesting.com";

/// Default booking API under test
pub const DEFAULT_API_URL: &str = "https://restful-booker.herokuapp.com";

/// Upper bound on navigation retries accepted by validation
pub const MAX_NAVIGATION_RETRIES: u32 = 10;

// =============================================================================
// ROUTES
// =============================================================================

/// Storefront routes, relative to `base_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub sign_up: String,
    pub sign_in: String,
    pub account: String,
    pub profile: String,
    pub favorites: String,
    pub cart: String,
    pub contact: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            sign_up: "/auth/register".to_string(),
            sign_in: "/auth/login".to_string(),
            account: "/account".to_string(),
            profile: "/account/profile".to_string(),
            favorites: "/account/favorites".to_string(),
            cart: "/checkout".to_string(),
            contact: "/contact".to_string(),
        }
    }
}

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Wait budgets in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Default wait before acting on an element
    pub action_ms: u64,
    /// Product grid render
    pub products_ms: u64,
    /// `filter_started` marker after a filter click
    pub filter_started_ms: u64,
    /// `filter_completed` marker after a filter click
    pub filter_completed_ms: u64,
    /// Whole navigation budget, divided across attempts
    pub navigation_ms: u64,
    /// URL change after a click
    pub url_change_ms: u64,
    /// Expected-absence probes (banners, pagination, search results)
    pub presence_probe_ms: u64,
    /// "No results" marker probe
    pub no_results_probe_ms: u64,
    /// Language selector and translated text
    pub language_ms: u64,
    /// Add-to-favorites button on the detail page
    pub favorites_button_ms: u64,
    /// Redirect after registration
    pub registration_ms: u64,
    /// Short probe for an in-flight filter
    pub filter_processing_probe_ms: u64,
    /// Fixed pause after the profile form shows, before touching the phone
    pub profile_settle_ms: u64,
    /// Fixed pause after the language dropdown shows the new code
    pub language_settle_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            action_ms: 10_000,
            products_ms: 15_000,
            filter_started_ms: 5_000,
            filter_completed_ms: 15_000,
            navigation_ms: 45_000,
            url_change_ms: 15_000,
            presence_probe_ms: 3_000,
            no_results_probe_ms: 5_000,
            language_ms: 20_000,
            favorites_button_ms: 25_000,
            registration_ms: 30_000,
            filter_processing_probe_ms: 1_000,
            profile_settle_ms: 2_000,
            language_settle_ms: 500,
        }
    }
}

impl Timeouts {
    /// Uniform small budgets for in-memory drivers, with no settle pauses
    #[must_use]
    pub const fn uniform(ms: u64) -> Self {
        Self {
            action_ms: ms,
            products_ms: ms,
            filter_started_ms: ms,
            filter_completed_ms: ms,
            navigation_ms: ms * 3,
            url_change_ms: ms,
            presence_probe_ms: ms,
            no_results_probe_ms: ms,
            language_ms: ms,
            favorites_button_ms: ms,
            registration_ms: ms,
            filter_processing_probe_ms: ms,
            profile_settle_ms: 0,
            language_settle_ms: 0,
        }
    }
}

/// Converts a millisecond budget into a [`Duration`]
#[must_use]
pub const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================================
// NAVIGATION / PAGINATION / BROWSER / API
// =============================================================================

/// Bounded navigation retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationPolicy {
    /// Retries after the first attempt
    pub retries: u32,
    /// Fixed pause between attempts
    pub backoff_ms: u64,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff_ms: 3_000,
        }
    }
}

impl NavigationPolicy {
    /// Total attempts (first attempt plus retries)
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.retries + 1
    }
}

/// Pagination traversal guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationPolicy {
    /// Runaway guard for multi-page traversals
    pub max_pages: u32,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self { max_pages: 10 }
    }
}

/// Browser launch options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit Chromium binary
    pub chromium_path: Option<PathBuf>,
    pub sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
        }
    }
}

/// Booking API options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiOptions {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Latency ceiling asserted by the API scenarios
    pub max_response_ms: u64,
    /// Per-request transport timeout
    pub request_timeout_ms: u64,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            username: "admin".to_string(),
            password: "password123".to_string(),
            max_response_ms: 1_500,
            request_timeout_ms: 30_000,
        }
    }
}

// =============================================================================
// SUITE CONFIG
// =============================================================================

/// Complete harness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Storefront base URL
    pub base_url: String,
    pub routes: Routes,
    pub timeouts: Timeouts,
    pub navigation: NavigationPolicy,
    pub pagination: PaginationPolicy,
    /// Poll interval for every wait
    pub poll_interval_ms: u64,
    pub browser: BrowserOptions,
    pub api: ApiOptions,
    /// Where `take_screenshot` writes PNG files
    pub screenshot_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            routes: Routes::default(),
            timeouts: Timeouts::default(),
            navigation: NavigationPolicy::default(),
            pagination: PaginationPolicy::default(),
            poll_interval_ms: 50,
            browser: BrowserOptions::default(),
            api: ApiOptions::default(),
            screenshot_dir: PathBuf::from("target/vitrina/screenshots"),
        }
    }
}

impl SuiteConfig {
    /// Create default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Short budgets and no backoff, for in-memory drivers
    #[must_use]
    pub fn fast() -> Self {
        Self {
            timeouts: Timeouts::uniform(200),
            navigation: NavigationPolicy {
                retries: 2,
                backoff_ms: 0,
            },
            poll_interval_ms: 5,
            ..Self::default()
        }
    }

    /// Set the storefront base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the booking API base URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the pagination guard
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.pagination.max_pages = max_pages;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.browser.headless = headless;
        self
    }

    /// Poll interval as a [`Duration`]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        ms(self.poll_interval_ms)
    }

    /// Join a route onto the storefront base URL
    #[must_use]
    pub fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url.trim_end_matches('/'))
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> VitrinaResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> VitrinaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> VitrinaResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Apply `VITRINA_*` overrides from the process environment
    pub fn with_env_overrides(self) -> VitrinaResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> VitrinaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VITRINA_BASE_URL") {
            self = self.with_base_url(url);
        }
        if let Some(url) = lookup("VITRINA_API_URL") {
            self = self.with_api_url(url);
        }
        if let Some(raw) = lookup("VITRINA_MAX_PAGES") {
            let max_pages = raw.trim().parse::<u32>().map_err(|_| {
                VitrinaError::config(format!("VITRINA_MAX_PAGES must be an integer, got {raw:?}"))
            })?;
            self.pagination.max_pages = max_pages;
        }
        if let Some(raw) = lookup("VITRINA_HEADLESS") {
            self.browser.headless = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(VitrinaError::config(format!(
                        "VITRINA_HEADLESS must be a boolean, got {raw:?}"
                    )))
                }
            };
        }
        if let Some(path) = lookup("VITRINA_CHROMIUM_PATH") {
            self.browser.chromium_path = Some(PathBuf::from(path));
        }
        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> VitrinaResult<()> {
        if self.pagination.max_pages == 0 {
            return Err(VitrinaError::config("pagination.max_pages must be at least 1"));
        }
        if self.navigation.retries > MAX_NAVIGATION_RETRIES {
            return Err(VitrinaError::config(format!(
                "navigation.retries must be at most {MAX_NAVIGATION_RETRIES}"
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(VitrinaError::config("base_url must not be empty"));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(VitrinaError::config("api.base_url must not be empty"));
        }
        if self.poll_interval_ms == 0 {
            return Err(VitrinaError::config("poll_interval_ms must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod default_tests {
        use super::*;

        #[test]
        fn test_defaults_match_storefront_budgets() {
            let config = SuiteConfig::default();
            assert_eq!(config.base_url, DEFAULT_BASE_URL);
            assert_eq!(config.pagination.max_pages, 10);
            assert_eq!(config.navigation.attempts(), 3);
            assert_eq!(config.navigation.backoff_ms, 3_000);
            assert_eq!(config.timeouts.navigation_ms, 45_000);
            assert_eq!(config.timeouts.filter_started_ms, 5_000);
            assert_eq!(config.timeouts.filter_completed_ms, 15_000);
            assert_eq!(config.api.max_response_ms, 1_500);
            assert_eq!(config.browser.viewport_width, 1920);
            assert_eq!(config.timeouts.profile_settle_ms, 2_000);
            assert_eq!(config.timeouts.language_settle_ms, 500);
        }

        #[test]
        fn test_fast_config_has_no_settle_pauses() {
            let timeouts = SuiteConfig::fast().timeouts;
            assert_eq!(timeouts.profile_settle_ms, 0);
            assert_eq!(timeouts.language_settle_ms, 0);
        }

        #[test]
        fn test_url_joins_route() {
            let config = SuiteConfig::default().with_base_url("http://localhost:4200/");
            assert_eq!(config.url("/checkout"), "http://localhost:4200/checkout");
        }

        #[test]
        fn test_default_validates() {
            assert!(SuiteConfig::default().validate().is_ok());
            assert!(SuiteConfig::fast().validate().is_ok());
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_partial_yaml_keeps_defaults() {
            let config = SuiteConfig::from_yaml(
                "base_url: http://shop.local\npagination:\n  max_pages: 4\n",
            )
            .unwrap();
            assert_eq!(config.base_url, "http://shop.local");
            assert_eq!(config.pagination.max_pages, 4);
            assert_eq!(config.timeouts.products_ms, 15_000);
        }

        #[test]
        fn test_settle_pauses_from_yaml() {
            let config = SuiteConfig::from_yaml(
                "timeouts:\n  profile_settle_ms: 750\n  language_settle_ms: 0\n",
            )
            .unwrap();
            assert_eq!(config.timeouts.profile_settle_ms, 750);
            assert_eq!(config.timeouts.language_settle_ms, 0);
            assert_eq!(config.timeouts.action_ms, 10_000);
        }

        #[test]
        fn test_zero_max_pages_rejected() {
            let err = SuiteConfig::from_yaml("pagination:\n  max_pages: 0\n").unwrap_err();
            assert!(matches!(err, VitrinaError::Config { .. }));
        }

        #[test]
        fn test_yaml_round_trip_through_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("vitrina.yaml");
            let original = SuiteConfig::default().with_max_pages(7);
            std::fs::write(&path, original.to_yaml().unwrap()).unwrap();
            assert_eq!(SuiteConfig::load(&path).unwrap(), original);
        }
    }

    mod env_tests {
        use super::*;
        use std::collections::HashMap;

        fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
            let map: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
            move |key| map.get(key).cloned()
        }

        #[test]
        fn test_overrides_applied() {
            let config = SuiteConfig::default()
                .apply_overrides(lookup(&[
                    ("VITRINA_BASE_URL", "http://127.0.0.1:9000/"),
                    ("VITRINA_MAX_PAGES", "3"),
                    ("VITRINA_HEADLESS", "false"),
                ]))
                .unwrap();
            assert_eq!(config.base_url, "http://127.0.0.1:9000");
            assert_eq!(config.pagination.max_pages, 3);
            assert!(!config.browser.headless);
        }

        #[test]
        fn test_bad_override_is_config_error() {
            let err = SuiteConfig::default()
                .apply_overrides(lookup(&[("VITRINA_MAX_PAGES", "lots")]))
                .unwrap_err();
            assert!(err.to_string().contains("VITRINA_MAX_PAGES"));
        }
    }
}

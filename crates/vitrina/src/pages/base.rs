//! Base page: waits, guarded actions and bounded-retry navigation shared by
//! every page and component.
//!
//! Plain waits never swallow a timeout. The one place a timeout becomes a
//! boolean is [`BasePage::appears_within`], which callers use only where
//! absence is itself a valid outcome.

use crate::config::{ms, SuiteConfig};
use crate::driver::BrowserDriver;
use crate::locator::Locator;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::{PageContext, PageKind, PageObject};
use crate::wait::{wait_until, ElementState, LoadState, UrlPattern};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Shared page behaviour over a [`PageContext`]
#[derive(Debug, Clone)]
pub struct BasePage {
    ctx: PageContext,
}

impl PageObject for BasePage {
    const KIND: PageKind = PageKind::Base;

    fn from_context(ctx: PageContext) -> Self {
        Self { ctx }
    }

    fn base(&self) -> &BasePage {
        self
    }
}

impl BasePage {
    /// Session context
    #[must_use]
    pub const fn context(&self) -> &PageContext {
        &self.ctx
    }

    /// Browser capability
    #[must_use]
    pub fn driver(&self) -> &dyn BrowserDriver {
        self.ctx.driver()
    }

    /// Injected configuration
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        self.ctx.config()
    }

    fn interval(&self) -> Duration {
        self.config().poll_interval()
    }

    // =========================================================================
    // Waits
    // =========================================================================

    /// Wait until the first match reaches `state`
    pub async fn wait_for_state(
        &self,
        locator: &Locator,
        state: ElementState,
        timeout_ms: u64,
    ) -> VitrinaResult<()> {
        self.driver()
            .wait_for(&locator.clone().pick_first(), state, ms(timeout_ms), self.interval())
            .await
    }

    pub async fn wait_visible(&self, locator: &Locator, timeout_ms: u64) -> VitrinaResult<()> {
        self.wait_for_state(locator, ElementState::Visible, timeout_ms)
            .await
    }

    pub async fn wait_attached(&self, locator: &Locator, timeout_ms: u64) -> VitrinaResult<()> {
        self.wait_for_state(locator, ElementState::Attached, timeout_ms)
            .await
    }

    pub async fn wait_hidden(&self, locator: &Locator, timeout_ms: u64) -> VitrinaResult<()> {
        self.wait_for_state(locator, ElementState::Hidden, timeout_ms)
            .await
    }

    pub async fn wait_detached(&self, locator: &Locator, timeout_ms: u64) -> VitrinaResult<()> {
        self.wait_for_state(locator, ElementState::Detached, timeout_ms)
            .await
    }

    /// Expected-absence probe: `Ok(false)` when the wait times out.
    ///
    /// Every other failure still propagates.
    pub async fn appears_within(
        &self,
        locator: &Locator,
        state: ElementState,
        timeout_ms: u64,
    ) -> VitrinaResult<bool> {
        match self.wait_for_state(locator, state, timeout_ms).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether the element becomes visible within the presence-probe budget
    pub async fn is_element_visible(&self, locator: &Locator) -> VitrinaResult<bool> {
        let timeout = self.config().timeouts.presence_probe_ms;
        self.appears_within(locator, ElementState::Visible, timeout)
            .await
    }

    /// Wait for the page URL to match within the URL-change budget
    pub async fn wait_for_url(&self, pattern: &UrlPattern) -> VitrinaResult<()> {
        self.wait_for_url_within(pattern, self.config().timeouts.url_change_ms)
            .await
    }

    pub async fn wait_for_url_within(
        &self,
        pattern: &UrlPattern,
        timeout_ms: u64,
    ) -> VitrinaResult<()> {
        self.driver()
            .wait_for_url(pattern, ms(timeout_ms), self.interval())
            .await
    }

    /// Wait until the trimmed text of the first match satisfies `accept`.
    ///
    /// A detached element counts as not yet matching.
    pub async fn wait_for_text<F>(
        &self,
        locator: &Locator,
        expectation: &str,
        timeout_ms: u64,
        accept: F,
    ) -> VitrinaResult<()>
    where
        F: Fn(&str) -> bool + Send + Sync,
    {
        let driver = self.driver();
        let target = locator.clone().pick_first();
        let target = &target;
        let accept = &accept;
        wait_until(
            &locator.to_string(),
            expectation,
            ms(timeout_ms),
            self.interval(),
            move || async move {
                if driver.count(target).await? == 0 {
                    return Ok(false);
                }
                let text = driver.text_content(target).await?;
                Ok(accept(text.trim()))
            },
        )
        .await
    }

    /// Fixed pause; used only where the storefront has no observable signal
    pub async fn pause(&self, pause_ms: u64) {
        self.driver().pause(ms(pause_ms)).await;
    }

    // =========================================================================
    // Guarded actions
    // =========================================================================

    /// Wait for visibility, then click
    pub async fn safe_click(&self, locator: &Locator) -> VitrinaResult<()> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        self.driver().click(&locator.clone().pick_first()).await
    }

    /// Wait for visibility, then fill
    pub async fn safe_fill(&self, locator: &Locator, value: &str) -> VitrinaResult<()> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        self.driver().fill(&locator.clone().pick_first(), value).await
    }

    /// Wait for visibility, then check
    pub async fn safe_check(&self, locator: &Locator) -> VitrinaResult<()> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        self.driver()
            .set_checked(&locator.clone().pick_first(), true)
            .await
    }

    /// Wait for visibility, then uncheck
    pub async fn safe_uncheck(&self, locator: &Locator) -> VitrinaResult<()> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        self.driver()
            .set_checked(&locator.clone().pick_first(), false)
            .await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Trimmed text of the first match, after it becomes visible
    pub async fn element_text(&self, locator: &Locator) -> VitrinaResult<String> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        let text = self.driver().text_content(&locator.clone().pick_first()).await?;
        Ok(text.trim().to_string())
    }

    /// Value of the first matching control, after it becomes visible
    pub async fn input_value(&self, locator: &Locator) -> VitrinaResult<String> {
        self.wait_visible(locator, self.config().timeouts.action_ms)
            .await?;
        self.driver().input_value(&locator.clone().pick_first()).await
    }

    /// Number of matches; 0 when nothing becomes visible within the action budget
    pub async fn element_count(&self, locator: &Locator) -> VitrinaResult<usize> {
        let timeout = self.config().timeouts.action_ms;
        if !self
            .appears_within(locator, ElementState::Visible, timeout)
            .await?
        {
            return Ok(0);
        }
        self.driver().count(locator).await
    }

    /// Trimmed text of every match
    pub async fn all_texts(&self, locator: &Locator) -> VitrinaResult<Vec<String>> {
        let texts = self.driver().all_text_contents(locator).await?;
        Ok(texts.into_iter().map(|t| t.trim().to_string()).collect())
    }

    pub async fn title(&self) -> VitrinaResult<String> {
        self.driver().title().await
    }

    pub async fn current_url(&self) -> VitrinaResult<String> {
        self.driver().current_url().await
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate with bounded retry.
    ///
    /// Makes `retries + 1` attempts. The first waits for DOMContentLoaded,
    /// later ones for network idle. Each attempt gets an equal slice of the
    /// navigation budget, with a fixed backoff pause between attempts. When
    /// every attempt fails the last error is returned unchanged.
    pub async fn navigate_to(&self, url: &str) -> VitrinaResult<()> {
        let policy = self.config().navigation;
        let attempts = policy.attempts();
        let slice = ms(self.config().timeouts.navigation_ms / u64::from(attempts));
        let mut last_error = None;

        for attempt in 1..=attempts {
            let until = if attempt == 1 {
                LoadState::DomContentLoaded
            } else {
                LoadState::NetworkIdle
            };
            info!(
                session = %self.ctx.session_id(),
                attempt,
                url,
                %until,
                "navigation attempt"
            );
            match self.driver().goto(url, until, slice).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(attempt, url, error = %e, "navigation attempt failed");
                    last_error = Some(e);
                    if attempt < attempts {
                        self.pause(policy.backoff_ms).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| VitrinaError::Navigation {
            url: url.to_string(),
            message: "no navigation attempt made".to_string(),
        }))
    }

    /// Save a PNG screenshot as `<screenshot_dir>/<name>.png`
    pub async fn take_screenshot(&self, name: &str) -> VitrinaResult<PathBuf> {
        let bytes = self.driver().screenshot().await?;
        let dir = self.config().screenshot_dir.clone();
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join(format!("{name}.png"));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

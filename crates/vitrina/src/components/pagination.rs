//! Pagination control under the product listing.
//!
//! A control counts as disabled when its enclosing `li` carries the
//! `disabled` class. Page moves settle once the active page number changes.

use crate::config::ms;
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::{PageContext, PageObject};
use crate::wait::{wait_until, ElementState};

/// Previous/next items are list items too
const CONTROL_ITEMS: usize = 2;

/// Pagination links and their state
#[derive(Debug, Clone)]
pub struct PaginationComponent {
    base: BasePage,
}

/// Direction of a relative page move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl Direction {
    const fn label(self) -> &'static str {
        match self {
            Self::Next => "Next",
            Self::Previous => "Previous",
        }
    }

    fn control(self) -> Locator {
        Locator::css(format!("a[aria-label=\"{}\"]", self.label()))
    }
}

fn parse_page_number(text: &str) -> VitrinaResult<u32> {
    text.trim().parse().map_err(|_| {
        VitrinaError::driver(format!("pagination link has non-numeric text {text:?}"))
    })
}

impl PaginationComponent {
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    // =========================================================================
    // Locators
    // =========================================================================

    #[must_use]
    pub fn next_button() -> Locator {
        Direction::Next.control()
    }

    #[must_use]
    pub fn previous_button() -> Locator {
        Direction::Previous.control()
    }

    #[must_use]
    pub fn container() -> Locator {
        Locator::css(".pagination")
    }

    /// Every list item, including previous/next
    #[must_use]
    pub fn items() -> Locator {
        Locator::css(".pagination .page-item")
    }

    #[must_use]
    pub fn page_number_links() -> Locator {
        Locator::css(".pagination .page-item:not(.previous):not(.next) .page-link")
    }

    #[must_use]
    pub fn active_page() -> Locator {
        Locator::css(".pagination .page-item.active .page-link")
    }

    #[must_use]
    pub fn page_link(number: u32) -> Locator {
        Locator::css(".pagination .page-link").with_exact_text(number.to_string())
    }

    // =========================================================================
    // Moves
    // =========================================================================

    pub async fn has_next_page(&self) -> VitrinaResult<bool> {
        self.is_enabled(Direction::Next).await
    }

    pub async fn has_previous_page(&self) -> VitrinaResult<bool> {
        self.is_enabled(Direction::Previous).await
    }

    /// Click "Next" and wait for the active page to change
    pub async fn click_next_page(&self) -> VitrinaResult<()> {
        self.step(Direction::Next).await
    }

    /// Click "Previous" and wait for the active page to change
    pub async fn click_previous_page(&self) -> VitrinaResult<()> {
        self.step(Direction::Previous).await
    }

    /// Jump to a numbered page
    pub async fn click_page_number(&self, number: u32) -> VitrinaResult<()> {
        self.base.safe_click(&Self::page_link(number)).await?;
        self.wait_for_active_page(|current| current == number).await
    }

    async fn is_enabled(&self, direction: Direction) -> VitrinaResult<bool> {
        let control = direction.control();
        if self.base.driver().count(&control).await? == 0 {
            return Ok(false);
        }
        self.base
            .wait_visible(&control, self.base.config().timeouts.action_ms)
            .await?;
        let disabled = self
            .base
            .driver()
            .ancestor_has_class(&control.pick_first(), "li", "disabled")
            .await?;
        Ok(!disabled)
    }

    async fn step(&self, direction: Direction) -> VitrinaResult<()> {
        let control = direction.control();
        if !self.is_enabled(direction).await? {
            return Err(VitrinaError::action(
                "click",
                control.to_string(),
                format!(
                    "{} page button is disabled - cannot navigate",
                    direction.label()
                ),
            ));
        }
        let before = self.read_active_page().await?;
        self.base.driver().click(&control.pick_first()).await?;
        self.wait_for_active_page(|current| current != before)
            .await?;
        tracing::debug!(from = before, direction = direction.label(), "page changed");
        Ok(())
    }

    async fn wait_for_active_page<F>(&self, accept: F) -> VitrinaResult<()>
    where
        F: Fn(u32) -> bool + Send + Sync,
    {
        let page = self;
        let accept = &accept;
        wait_until(
            "active page",
            "changed",
            ms(self.base.config().timeouts.products_ms),
            self.base.config().poll_interval(),
            move || async move { Ok(accept(page.read_active_page().await?)) },
        )
        .await
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Active page without waiting; 1 when no item is marked active
    async fn read_active_page(&self) -> VitrinaResult<u32> {
        let active = Self::active_page().first();
        let driver = self.base.driver();
        if driver.count(&active).await? == 0 {
            return Ok(1);
        }
        parse_page_number(&driver.text_content(&active).await?)
    }

    async fn wait_for_container(&self) -> VitrinaResult<()> {
        self.base
            .wait_visible(&Self::container(), self.base.config().timeouts.action_ms)
            .await
    }

    /// Number of numbered pages
    pub async fn page_count(&self) -> VitrinaResult<usize> {
        self.wait_for_container().await?;
        let items = self.base.driver().count(&Self::items()).await?;
        Ok(items.saturating_sub(CONTROL_ITEMS))
    }

    /// Active page number; 1 when no item is marked active
    pub async fn current_page_number(&self) -> VitrinaResult<u32> {
        self.wait_for_container().await?;
        self.read_active_page().await
    }

    pub async fn available_page_numbers(&self) -> VitrinaResult<Vec<u32>> {
        self.wait_for_container().await?;
        self.base
            .all_texts(&Self::page_number_links())
            .await?
            .iter()
            .map(|text| parse_page_number(text))
            .collect()
    }

    /// Expected-absence probe for the whole control
    pub async fn is_pagination_visible(&self) -> VitrinaResult<bool> {
        let budget = self.base.config().timeouts.presence_probe_ms;
        self.base
            .appears_within(&Self::container(), ElementState::Visible, budget)
            .await
    }

    pub async fn is_page_active(&self, number: u32) -> VitrinaResult<bool> {
        Ok(self.current_page_number().await? == number)
    }

    pub async fn is_page_available(&self, number: u32) -> VitrinaResult<bool> {
        self.wait_for_container().await?;
        Ok(self.base.driver().count(&Self::page_link(number)).await? > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockNode};
    use crate::session::Session;
    use std::sync::Arc;

    type P = PaginationComponent;

    /// Three pages, first active, previous disabled
    fn setup() -> (Arc<MockDriver>, PaginationComponent) {
        let driver = Arc::new(MockDriver::new());
        driver.set_element(&P::container(), MockNode::new(""));
        driver.set_texts(&P::items(), &["«", "1", "2", "3", "»"]);
        driver.set_texts(&P::page_number_links(), &["1", "2", "3"]);
        driver.set_texts(&P::page_link(2), &["2"]);
        driver.set_element(&P::active_page(), MockNode::new(" 1 "));
        driver.set_element(&P::previous_button(), MockNode::new("«").within("li", "disabled"));
        driver.set_element(&P::next_button(), MockNode::new("»"));
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, P::new(session.context().clone()))
    }

    mod state_tests {
        use super::*;

        #[tokio::test]
        async fn test_page_count_excludes_controls() {
            let (_driver, pagination) = setup();
            assert_eq!(pagination.page_count().await.unwrap(), 3);
            assert_eq!(
                pagination.available_page_numbers().await.unwrap(),
                vec![1, 2, 3]
            );
        }

        #[tokio::test]
        async fn test_enabled_state_follows_enclosing_item() {
            let (_driver, pagination) = setup();
            assert!(pagination.has_next_page().await.unwrap());
            assert!(!pagination.has_previous_page().await.unwrap());
        }

        #[tokio::test]
        async fn test_missing_control_means_no_page() {
            let (driver, pagination) = setup();
            driver.remove_element(&P::next_button());
            assert!(!pagination.has_next_page().await.unwrap());
        }

        #[tokio::test]
        async fn test_no_active_item_defaults_to_first_page() {
            let (driver, pagination) = setup();
            driver.remove_element(&P::active_page());
            assert_eq!(pagination.current_page_number().await.unwrap(), 1);
            assert!(pagination.is_page_active(1).await.unwrap());
        }

        #[tokio::test]
        async fn test_availability_and_visibility() {
            let (driver, pagination) = setup();
            assert!(pagination.is_page_available(2).await.unwrap());
            assert!(!pagination.is_page_available(7).await.unwrap());
            driver.remove_element(&P::container());
            assert!(!pagination.is_pagination_visible().await.unwrap());
        }
    }

    mod move_tests {
        use super::*;

        #[tokio::test]
        async fn test_next_waits_for_active_page_change() {
            let (driver, pagination) = setup();
            driver.on_action(&P::next_button().first(), |dom| {
                dom.set(&P::active_page(), vec![MockNode::new("2")]);
            });
            pagination.click_next_page().await.unwrap();
            assert_eq!(pagination.current_page_number().await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_next_times_out_when_page_never_changes() {
            let (_driver, pagination) = setup();
            let err = pagination.click_next_page().await.unwrap_err();
            assert!(err.is_timeout());
        }

        #[tokio::test]
        async fn test_disabled_previous_is_an_action_error() {
            let (driver, pagination) = setup();
            let err = pagination.click_previous_page().await.unwrap_err();
            assert!(matches!(err, VitrinaError::ActionFailed { .. }));
            assert!(err
                .to_string()
                .contains("Previous page button is disabled - cannot navigate"));
            assert!(!driver.was_called("click:"));
        }

        #[tokio::test]
        async fn test_click_page_number() {
            let (driver, pagination) = setup();
            driver.on_action(&P::page_link(2).first(), |dom| {
                dom.set(&P::active_page(), vec![MockNode::new("2")]);
            });
            pagination.click_page_number(2).await.unwrap();
            assert!(pagination.is_page_active(2).await.unwrap());
        }
    }
}

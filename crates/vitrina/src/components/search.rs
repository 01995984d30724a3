//! Product search box

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageObject};
use crate::wait::ElementState;

/// Search field, button and results container
#[derive(Debug, Clone)]
pub struct SearchComponent {
    base: BasePage,
}

impl SearchComponent {
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    #[must_use]
    pub fn search_field() -> Locator {
        Locator::test_id("search-query")
    }

    #[must_use]
    pub fn search_button() -> Locator {
        Locator::role_named("button", "Search")
    }

    #[must_use]
    pub fn results_container() -> Locator {
        Locator::css("div.container[data-test=\"search_completed\"]")
    }

    /// Product names inside the results container
    #[must_use]
    pub fn result_names() -> Locator {
        Self::results_container().locator("h5[data-test=\"product-name\"]")
    }

    pub async fn fill_search(&self, product: &str) -> VitrinaResult<()> {
        self.base.safe_fill(&Self::search_field(), product).await
    }

    /// Fill the field and submit
    pub async fn search_product(&self, product: &str) -> VitrinaResult<()> {
        self.fill_search(product).await?;
        self.base.safe_click(&Self::search_button()).await
    }

    /// Results container visible, then its first product name visible
    pub async fn wait_for_search_results(&self) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.products_ms;
        self.base
            .wait_visible(&Self::results_container(), budget)
            .await?;
        self.base.wait_visible(&Self::result_names(), budget).await
    }

    pub async fn first_product_name(&self) -> VitrinaResult<String> {
        self.wait_for_search_results().await?;
        self.base.element_text(&Self::result_names()).await
    }

    /// Expected-absence probe on the results container
    pub async fn has_search_results(&self) -> VitrinaResult<bool> {
        let budget = self.base.config().timeouts.presence_probe_ms;
        self.base
            .appears_within(&Self::results_container(), ElementState::Visible, budget)
            .await
    }

    pub async fn clear_search(&self) -> VitrinaResult<()> {
        self.base.safe_fill(&Self::search_field(), "").await
    }

    pub async fn search_value(&self) -> VitrinaResult<String> {
        self.base.input_value(&Self::search_field()).await
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

    fn setup() -> (Arc<MockDriver>, SearchComponent) {
        let driver = Arc::new(MockDriver::new());
        driver.set_element(&SearchComponent::search_field(), MockNode::input(""));
        driver.set_element(&SearchComponent::search_button(), MockNode::new("Search"));
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, SearchComponent::new(session.context().clone()))
    }

    #[tokio::test]
    async fn test_search_fills_and_submits() {
        let (driver, search) = setup();
        driver.on_action(&SearchComponent::search_button().first(), |dom| {
            dom.set(
                &SearchComponent::results_container(),
                vec![MockNode::new("")],
            );
            dom.set(
                &SearchComponent::result_names(),
                vec![MockNode::new(" Bolt Cutters "), MockNode::new("Bolt Cutters XL")],
            );
        });

        search.search_product("Bolt Cutters").await.unwrap();
        assert_eq!(search.search_value().await.unwrap(), "Bolt Cutters");
        assert_eq!(search.first_product_name().await.unwrap(), "Bolt Cutters");
        assert!(search.has_search_results().await.unwrap());
    }

    #[tokio::test]
    async fn test_no_results_is_a_probe_not_an_error() {
        let (_driver, search) = setup();
        assert!(!search.has_search_results().await.unwrap());
        assert!(search.wait_for_search_results().await.unwrap_err().is_timeout());
    }

    #[tokio::test]
    async fn test_clear_search() {
        let (_driver, search) = setup();
        search.fill_search("Belt Sander").await.unwrap();
        search.clear_search().await.unwrap();
        assert_eq!(search.search_value().await.unwrap(), "");
    }
}

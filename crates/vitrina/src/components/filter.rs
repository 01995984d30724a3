//! Sidebar filters: brands, eco-friendly toggle and subcategories.
//!
//! The storefront toggles a `filter_started` marker when it begins
//! re-querying and a `filter_completed` marker when the listing is redrawn.
//! Every mutating action here waits for that cycle before returning, so the
//! caller never reads a half-updated listing.

use crate::catalog::{Brand, Subcategory};
use crate::config::ms;
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageObject};
use crate::wait::{wait_until, ElementState};

const CHECKBOX: &str = "input[type=\"checkbox\"]";

/// Filter sidebar on the product listing
#[derive(Debug, Clone)]
pub struct FilterComponent {
    base: BasePage,
}

impl FilterComponent {
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
    pub fn eco_filter() -> Locator {
        Locator::css("input[data-test=\"eco-friendly-filter\"]")
    }

    #[must_use]
    pub fn brand_checkbox(brand: Brand) -> Locator {
        Locator::css(".checkbox label")
            .with_text(brand.label())
            .locator(CHECKBOX)
    }

    #[must_use]
    pub fn subcategory_label(subcategory: Subcategory) -> Locator {
        Locator::css(".checkbox label").with_exact_text(subcategory.label())
    }

    #[must_use]
    pub fn subcategory_checkbox(subcategory: Subcategory) -> Locator {
        Self::subcategory_label(subcategory).locator(CHECKBOX)
    }

    #[must_use]
    pub fn filter_started() -> Locator {
        Locator::test_id("filter_started")
    }

    #[must_use]
    pub fn filter_completed() -> Locator {
        Locator::test_id("filter_completed")
    }

    #[must_use]
    pub fn no_results() -> Locator {
        Locator::test_id("no-results")
    }

    #[must_use]
    pub fn product_names() -> Locator {
        Locator::css("h5[data-test=\"product-name\"]")
    }

    // =========================================================================
    // Brands
    // =========================================================================

    pub async fn select_brand(&self, brand: Brand) -> VitrinaResult<()> {
        self.base.safe_check(&Self::brand_checkbox(brand)).await?;
        tracing::debug!(brand = %brand, "brand selected");
        self.wait_for_filter_cycle().await
    }

    pub async fn deselect_brand(&self, brand: Brand) -> VitrinaResult<()> {
        self.base.safe_uncheck(&Self::brand_checkbox(brand)).await?;
        tracing::debug!(brand = %brand, "brand deselected");
        self.wait_for_filter_cycle().await
    }

    pub async fn is_brand_selected(&self, brand: Brand) -> VitrinaResult<bool> {
        self.is_checked(&Self::brand_checkbox(brand)).await
    }

    /// Deselect every selected brand in `brands`
    pub async fn clear_brand_filters(&self, brands: &[Brand]) -> VitrinaResult<()> {
        for &brand in brands {
            if self.is_brand_selected(brand).await? {
                self.deselect_brand(brand).await?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Eco-friendly
    // =========================================================================

    pub async fn check_eco_friendly(&self) -> VitrinaResult<()> {
        self.base.safe_check(&Self::eco_filter()).await?;
        self.wait_for_filter_cycle().await
    }

    pub async fn uncheck_eco_friendly(&self) -> VitrinaResult<()> {
        self.base.safe_uncheck(&Self::eco_filter()).await?;
        self.wait_for_filter_cycle().await
    }

    pub async fn is_eco_filter_selected(&self) -> VitrinaResult<bool> {
        self.is_checked(&Self::eco_filter()).await
    }

    pub async fn clear_eco_filter(&self) -> VitrinaResult<()> {
        if self.is_eco_filter_selected().await? {
            self.uncheck_eco_friendly().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Subcategories
    // =========================================================================

    /// Toggle a subcategory by its exact label
    pub async fn click_subcategory(&self, subcategory: Subcategory) -> VitrinaResult<()> {
        self.base
            .safe_click(&Self::subcategory_label(subcategory))
            .await?;
        tracing::debug!(subcategory = %subcategory, "subcategory toggled");
        self.wait_for_filter_cycle().await
    }

    pub async fn is_subcategory_selected(&self, subcategory: Subcategory) -> VitrinaResult<bool> {
        self.is_checked(&Self::subcategory_checkbox(subcategory))
            .await
    }

    // =========================================================================
    // Settling
    // =========================================================================

    /// `filter_started` attached, then `filter_completed` attached
    pub async fn wait_for_filter_cycle(&self) -> VitrinaResult<()> {
        let timeouts = &self.base.config().timeouts;
        self.base
            .wait_attached(&Self::filter_started(), timeouts.filter_started_ms)
            .await?;
        self.base
            .wait_attached(&Self::filter_completed(), timeouts.filter_completed_ms)
            .await
    }

    /// Either a product name or the no-results marker is attached
    pub async fn wait_for_filter_results(&self) -> VitrinaResult<()> {
        let driver = self.base.driver();
        let products = Self::product_names();
        let no_results = Self::no_results();
        let (products, no_results) = (&products, &no_results);
        wait_until(
            "filter results",
            "attached",
            ms(self.base.config().timeouts.products_ms),
            self.base.config().poll_interval(),
            move || async move {
                Ok(driver.count(products).await? > 0 || driver.count(no_results).await? > 0)
            },
        )
        .await
    }

    /// Expected-absence probe for the no-results message
    pub async fn has_no_results(&self) -> VitrinaResult<bool> {
        let budget = self.base.config().timeouts.no_results_probe_ms;
        self.base
            .appears_within(&Self::no_results(), ElementState::Visible, budget)
            .await
    }

    /// Whether a filter cycle has started within the processing probe budget
    pub async fn is_filter_processing(&self) -> VitrinaResult<bool> {
        let budget = self.base.config().timeouts.filter_processing_probe_ms;
        self.base
            .appears_within(&Self::filter_started(), ElementState::Attached, budget)
            .await
    }

    async fn is_checked(&self, checkbox: &Locator) -> VitrinaResult<bool> {
        self.base
            .wait_visible(checkbox, self.base.config().timeouts.action_ms)
            .await?;
        self.base
            .driver()
            .is_checked(&checkbox.clone().pick_first())
            .await
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

    fn setup() -> (Arc<MockDriver>, FilterComponent) {
        let driver = Arc::new(MockDriver::new());
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, FilterComponent::new(session.context().clone()))
    }

    /// Markers appear only once the checkbox has been toggled
    fn script_cycle(driver: &MockDriver, trigger: &Locator) {
        driver.on_action(&trigger.clone().first(), |dom| {
            dom.set(&FilterComponent::filter_started(), vec![MockNode::new("")]);
            dom.set(&FilterComponent::filter_completed(), vec![MockNode::new("")]);
        });
    }

    mod brand_tests {
        use super::*;

        #[test]
        fn test_brand_checkbox_locator() {
            assert_eq!(
                FilterComponent::brand_checkbox(Brand::ForgeFlexTools).to_string(),
                ".checkbox label:has-text(\"ForgeFlex Tools\") >> input[type=\"checkbox\"]"
            );
        }

        #[tokio::test]
        async fn test_select_brand_waits_for_cycle() {
            let (driver, filter) = setup();
            let checkbox = FilterComponent::brand_checkbox(Brand::ForgeFlexTools);
            driver.set_element(&checkbox, MockNode::input(""));
            script_cycle(&driver, &checkbox);

            filter.select_brand(Brand::ForgeFlexTools).await.unwrap();
            assert!(filter.is_brand_selected(Brand::ForgeFlexTools).await.unwrap());
        }

        #[tokio::test]
        async fn test_select_brand_fails_when_cycle_never_starts() {
            let (driver, filter) = setup();
            let checkbox = FilterComponent::brand_checkbox(Brand::MightyCraftHardware);
            driver.set_element(&checkbox, MockNode::input(""));
            let err = filter
                .select_brand(Brand::MightyCraftHardware)
                .await
                .unwrap_err();
            assert!(err.to_string().contains("filter_started"));
        }

        #[tokio::test]
        async fn test_clear_brand_filters_skips_unselected() {
            let (driver, filter) = setup();
            let forge = FilterComponent::brand_checkbox(Brand::ForgeFlexTools);
            let mighty = FilterComponent::brand_checkbox(Brand::MightyCraftHardware);
            driver.set_element(&forge, MockNode::input("").checked());
            driver.set_element(&mighty, MockNode::input(""));
            script_cycle(&driver, &forge);

            filter.clear_brand_filters(&Brand::ALL).await.unwrap();
            assert!(!filter.is_brand_selected(Brand::ForgeFlexTools).await.unwrap());
            assert_eq!(driver.calls("uncheck:"), 1);
        }
    }

    mod eco_tests {
        use super::*;

        #[tokio::test]
        async fn test_eco_toggle_and_clear() {
            let (driver, filter) = setup();
            driver.set_element(&FilterComponent::eco_filter(), MockNode::input(""));
            script_cycle(&driver, &FilterComponent::eco_filter());

            filter.check_eco_friendly().await.unwrap();
            assert!(filter.is_eco_filter_selected().await.unwrap());
            filter.clear_eco_filter().await.unwrap();
            assert!(!filter.is_eco_filter_selected().await.unwrap());
        }
    }

    mod settle_tests {
        use super::*;

        #[tokio::test]
        async fn test_filter_results_accepts_no_results_marker() {
            let (driver, filter) = setup();
            driver.set_element(&FilterComponent::no_results(), MockNode::new("There are no products found."));
            filter.wait_for_filter_results().await.unwrap();
            assert!(filter.has_no_results().await.unwrap());
        }

        #[tokio::test]
        async fn test_probes_report_absence() {
            let (_driver, filter) = setup();
            assert!(!filter.has_no_results().await.unwrap());
            assert!(!filter.is_filter_processing().await.unwrap());
            assert!(filter.wait_for_filter_results().await.unwrap_err().is_timeout());
        }

        #[tokio::test]
        async fn test_subcategory_click_uses_exact_label() {
            let (driver, filter) = setup();
            let label = FilterComponent::subcategory_label(Subcategory::Saw);
            driver.set_element(&label, MockNode::new("Saw"));
            script_cycle(&driver, &label);
            filter.click_subcategory(Subcategory::Saw).await.unwrap();
            assert!(driver.was_called("click:.checkbox label:text-is(\"Saw\")"));
        }
    }
}

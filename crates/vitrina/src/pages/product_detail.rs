//! Product detail: price, quantity, cart and favorites actions

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::{PageContext, PageKind, PageObject};
use crate::validation::cart::parse_money;
use crate::wait::{ElementState, UrlPattern};

/// Detail page of a single product
#[derive(Debug, Clone)]
pub struct ProductDetailPage {
    base: BasePage,
}

impl PageObject for ProductDetailPage {
    const KIND: PageKind = PageKind::ProductDetail;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl ProductDetailPage {
    #[must_use]
    pub fn unit_price() -> Locator {
        Locator::test_id("unit-price")
    }

    #[must_use]
    pub fn description() -> Locator {
        Locator::test_id("product-description")
    }

    #[must_use]
    pub fn brand_badge() -> Locator {
        Locator::css("[aria-label=\"brand\"]")
    }

    #[must_use]
    pub fn quantity_input() -> Locator {
        Locator::test_id("quantity")
    }

    #[must_use]
    pub fn increase_button() -> Locator {
        Locator::test_id("increase-quantity")
    }

    #[must_use]
    pub fn add_to_cart_button() -> Locator {
        Locator::test_id("add-to-cart")
    }

    #[must_use]
    pub fn add_to_favorites_button() -> Locator {
        Locator::test_id("add-to-favorites")
    }

    #[must_use]
    pub fn cart_link() -> Locator {
        Locator::test_id("nav-cart")
    }

    #[must_use]
    pub fn cart_toast() -> Locator {
        Locator::css("div.toast-success")
    }

    #[must_use]
    pub fn favorites_toast() -> Locator {
        Locator::css("[aria-label=\"Product added to your favorites list.\"]")
    }

    #[must_use]
    pub fn favorites_error() -> Locator {
        Locator::css("div[role=\"alert\"]").with_text("Unauthorized")
    }

    /// Price and description visible
    pub async fn wait_for_product_data(&self) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.action_ms;
        self.base.wait_visible(&Self::unit_price(), budget).await?;
        self.base.wait_visible(&Self::description(), budget).await
    }

    pub async fn product_price(&self) -> VitrinaResult<f64> {
        parse_money(&self.base.element_text(&Self::unit_price()).await?)
    }

    pub async fn current_quantity(&self) -> VitrinaResult<u32> {
        let raw = self.base.input_value(&Self::quantity_input()).await?;
        raw.trim().parse().map_err(|_| {
            VitrinaError::driver(format!("quantity field holds {raw:?}"))
        })
    }

    pub async fn increase_quantity(&self, times: u32) -> VitrinaResult<()> {
        for _ in 0..times {
            self.base.safe_click(&Self::increase_button()).await?;
        }
        Ok(())
    }

    pub async fn click_add_to_cart(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::add_to_cart_button()).await
    }

    /// A toast appears, then goes away
    async fn wait_for_toast(&self, toast: &Locator) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.action_ms;
        self.base.wait_visible(toast, budget).await?;
        self.base.wait_detached(toast, budget).await
    }

    /// Press "+" `clicks` times, add to cart and wait for the confirmation
    pub async fn add_to_cart_by_plus_clicks(&self, clicks: u32) -> VitrinaResult<()> {
        self.increase_quantity(clicks).await?;
        self.click_add_to_cart().await?;
        self.wait_for_toast(&Self::cart_toast()).await
    }

    /// Add `quantity` units; the field starts at 1
    pub async fn add_to_cart(&self, quantity: u32) -> VitrinaResult<()> {
        if quantity == 0 {
            return Err(VitrinaError::invalid_argument(
                "quantity must be at least 1",
            ));
        }
        self.add_to_cart_by_plus_clicks(quantity - 1).await
    }

    pub async fn click_add_to_favorites(&self) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.favorites_button_ms;
        let button = Self::add_to_favorites_button();
        self.base.wait_visible(&button, budget).await?;
        self.base.driver().click(&button.pick_first()).await
    }

    pub async fn add_to_favorites(&self) -> VitrinaResult<()> {
        self.click_add_to_favorites().await?;
        self.wait_for_toast(&Self::favorites_toast()).await
    }

    /// Expected-absence probe for the "Unauthorized" alert
    pub async fn favorites_error_visible(&self) -> VitrinaResult<bool> {
        let budget = self.base.config().timeouts.action_ms;
        self.base
            .appears_within(&Self::favorites_error(), ElementState::Visible, budget)
            .await
    }

    pub async fn brand_badge_text(&self) -> VitrinaResult<String> {
        self.base.element_text(&Self::brand_badge()).await
    }

    /// Header cart link, then the checkout URL
    pub async fn go_to_cart(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::cart_link()).await?;
        self.base.wait_for_url(&UrlPattern::glob("**/checkout")).await
    }
}

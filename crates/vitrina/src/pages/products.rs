//! Product listing: search, filters, pagination and per-page product checks

use crate::catalog::{Brand, FilterSelection};
use crate::components::{FilterComponent, NavigationBar, PaginationComponent, SearchComponent};
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::{VitrinaError, VitrinaResult};
use crate::session::{PageContext, PageKind, PageObject};
use crate::traversal::PagedResults;
use crate::wait::UrlPattern;
use async_trait::async_trait;

/// Product listing page
#[derive(Debug, Clone)]
pub struct ProductsPage {
    base: BasePage,
    navigation: NavigationBar,
    search: SearchComponent,
    filter: FilterComponent,
    pagination: PaginationComponent,
}

impl PageObject for ProductsPage {
    const KIND: PageKind = PageKind::Products;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            navigation: NavigationBar::new(ctx.clone()),
            search: SearchComponent::new(ctx.clone()),
            filter: FilterComponent::new(ctx.clone()),
            pagination: PaginationComponent::new(ctx.clone()),
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

/// Case-insensitive: does `name` contain any of `keywords`?
#[must_use]
pub fn product_matches_keywords(name: &str, keywords: &[&str]) -> bool {
    let name = name.trim().to_lowercase();
    keywords
        .iter()
        .any(|keyword| name.contains(&keyword.to_lowercase()))
}

impl ProductsPage {
    // =========================================================================
    // Locators
    // =========================================================================

    #[must_use]
    pub fn product_cards() -> Locator {
        Locator::css("a.card")
    }

    #[must_use]
    pub fn product_names() -> Locator {
        Locator::css("h5[data-test=\"product-name\"]")
    }

    #[must_use]
    pub fn out_of_stock_labels() -> Locator {
        Locator::test_id("out-of-stock")
    }

    #[must_use]
    pub fn eco_badges() -> Locator {
        Locator::test_id("eco-badge")
    }

    /// Card whose product name contains `name`
    #[must_use]
    pub fn product_card(name: &str) -> Locator {
        Self::product_cards().has(Self::product_names().with_text(name))
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[must_use]
    pub const fn navigation(&self) -> &NavigationBar {
        &self.navigation
    }

    #[must_use]
    pub const fn search(&self) -> &SearchComponent {
        &self.search
    }

    #[must_use]
    pub const fn filter(&self) -> &FilterComponent {
        &self.filter
    }

    #[must_use]
    pub const fn pagination(&self) -> &PaginationComponent {
        &self.pagination
    }

    // =========================================================================
    // Navigation and settling
    // =========================================================================

    /// Open the listing and wait for the first products
    pub async fn navigate(&self) -> VitrinaResult<()> {
        let url = self.base.config().url("");
        self.base.navigate_to(&url).await?;
        self.wait_for_initial_products_load().await
    }

    pub async fn wait_for_initial_products_load(&self) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.products_ms;
        self.base.wait_visible(&Self::product_names(), budget).await
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Names of the products on the current page, trimmed
    pub async fn product_names_on_page(&self) -> VitrinaResult<Vec<String>> {
        self.base.all_texts(&Self::product_names()).await
    }

    /// Card count after the first product name is visible
    pub async fn product_count(&self) -> VitrinaResult<usize> {
        self.wait_for_initial_products_load().await?;
        self.base.driver().count(&Self::product_cards()).await
    }

    /// Card count, 0 when nothing is listed
    pub async fn current_page_product_count(&self) -> VitrinaResult<usize> {
        self.base.element_count(&Self::product_cards()).await
    }

    /// Expected-absence probe for any listed product
    pub async fn has_products_visible(&self) -> VitrinaResult<bool> {
        self.base.is_element_visible(&Self::product_names()).await
    }

    pub async fn has_out_of_stock_products(&self) -> VitrinaResult<bool> {
        self.wait_for_initial_products_load().await?;
        Ok(self.base.driver().count(&Self::out_of_stock_labels()).await? > 0)
    }

    /// Every listed product carries an eco badge, and at least one is listed
    pub async fn all_products_eco_badged(&self) -> VitrinaResult<bool> {
        let badges = self.base.element_count(&Self::eco_badges()).await?;
        let products = self.current_page_product_count().await?;
        Ok(products > 0 && badges == products)
    }

    /// Names on the current page that match none of `keywords`.
    ///
    /// An empty page is an error, not a pass.
    pub async fn invalid_product_names(&self, keywords: &[&str]) -> VitrinaResult<Vec<String>> {
        let names = self.product_names_on_page().await?;
        if names.is_empty() {
            return Err(VitrinaError::assertion("No products found"));
        }
        Ok(names
            .into_iter()
            .filter(|name| !product_matches_keywords(name, keywords))
            .collect())
    }

    pub async fn first_product_name(&self) -> VitrinaResult<String> {
        self.base.element_text(&Self::product_names()).await
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Click the card for `name` and wait for its detail URL
    pub async fn open_product(&self, name: &str) -> VitrinaResult<()> {
        self.base.safe_click(&Self::product_card(name)).await?;
        self.base.wait_for_url(&UrlPattern::Contains("/product/".into())).await
    }

    /// Open the first listed product
    pub async fn open_first_product(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::product_cards()).await?;
        self.base.wait_for_url(&UrlPattern::Contains("/product/".into())).await
    }

    /// From visible search results, open `name`
    pub async fn access_product_detail(&self, name: &str) -> VitrinaResult<()> {
        self.search.wait_for_search_results().await?;
        self.open_product(name).await
    }

    pub async fn search_and_select_product(&self, name: &str) -> VitrinaResult<()> {
        self.search.search_product(name).await?;
        self.search.wait_for_search_results().await?;
        self.access_product_detail(name).await
    }

    /// Category via the navigation bar, then brand via the sidebar
    pub async fn apply_filters(&self, selection: FilterSelection) -> VitrinaResult<()> {
        self.navigation.open_category(selection.category).await?;
        self.filter.select_brand(selection.brand).await
    }

    pub async fn clear_all_filters(&self, brands: &[Brand]) -> VitrinaResult<()> {
        self.filter.clear_brand_filters(brands).await?;
        self.filter.clear_eco_filter().await
    }
}

#[async_trait]
impl PagedResults for ProductsPage {
    async fn wait_until_settled(&self) -> VitrinaResult<()> {
        self.wait_for_initial_products_load().await
    }

    async fn has_next_page(&self) -> VitrinaResult<bool> {
        self.pagination.has_next_page().await
    }

    async fn advance(&self) -> VitrinaResult<()> {
        self.pagination.click_next_page().await
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

    fn setup() -> (Arc<MockDriver>, ProductsPage) {
        let driver = Arc::new(MockDriver::new());
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, session.products())
    }

    mod keyword_tests {
        use super::*;

        #[test]
        fn test_keyword_match_is_case_insensitive_substring() {
            assert!(product_matches_keywords("Wood Saw", &["saw"]));
            assert!(product_matches_keywords(" Leather toolbelt ", &["Toolbelt"]));
            assert!(!product_matches_keywords("Claw Hammer", &["Saw", "Drill"]));
        }

        #[tokio::test]
        async fn test_invalid_names_lists_mismatches() {
            let (driver, page) = setup();
            driver.set_texts(
                &ProductsPage::product_names(),
                &["Combination Pliers", "Thor Hammer", "Bolt Cutters"],
            );
            let invalid = page.invalid_product_names(&["Pliers", "Cutters"]).await.unwrap();
            assert_eq!(invalid, vec!["Thor Hammer"]);
        }

        #[tokio::test]
        async fn test_empty_page_is_an_error() {
            let (_driver, page) = setup();
            let err = page.invalid_product_names(&["Saw"]).await.unwrap_err();
            assert_eq!(err.to_string(), "Assertion failed: No products found");
        }
    }

    mod listing_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_waits_for_products() {
            let (driver, page) = setup();
            driver.set_texts(&ProductsPage::product_names(), &["Combination Pliers"]);
            page.navigate().await.unwrap();
            assert!(driver.was_called("goto:https://practicesoftwaretesting.com:"));
        }

        #[tokio::test]
        async fn test_eco_badges_require_products() {
            let (driver, page) = setup();
            assert!(!page.all_products_eco_badged().await.unwrap());
            driver.set_texts(&ProductsPage::product_cards(), &["a", "b"]);
            driver.set_texts(&ProductsPage::eco_badges(), &["ECO", "ECO"]);
            assert!(page.all_products_eco_badged().await.unwrap());
            driver.set_texts(&ProductsPage::eco_badges(), &["ECO"]);
            assert!(!page.all_products_eco_badged().await.unwrap());
        }

        #[tokio::test]
        async fn test_out_of_stock_detection() {
            let (driver, page) = setup();
            driver.set_texts(&ProductsPage::product_names(), &["Long Nose Pliers"]);
            assert!(!page.has_out_of_stock_products().await.unwrap());
            driver.set_texts(&ProductsPage::out_of_stock_labels(), &["Out of stock"]);
            assert!(page.has_out_of_stock_products().await.unwrap());
        }

        #[tokio::test]
        async fn test_open_product_waits_for_detail_url() {
            let (driver, page) = setup();
            let card = ProductsPage::product_card("Bolt Cutters");
            driver.set_element(&card, MockNode::new("Bolt Cutters $48.41"));
            driver.on_action(&card.first(), |dom| {
                dom.url = "https://practicesoftwaretesting.com/product/01HX".to_string();
            });
            page.open_product("Bolt Cutters").await.unwrap();
        }
    }
}

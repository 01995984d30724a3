//! Listing checks after filtering: stock, keywords, eco badges

use crate::catalog::{Brand, FilterSelection, Subcategory};
use crate::pages::{product_matches_keywords, ProductsPage};
use crate::result::VitrinaResult;
use crate::traversal::{validate_across_pages, PageCheck, TraversalReport};
use async_trait::async_trait;

pub const OUT_OF_STOCK_ERROR: &str = "Found out-of-stock products on current page";
pub const ECO_BADGE_ERROR: &str = "Not all products have ECO badge";

/// No product on the page is labelled out of stock
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOutOfStock;

#[async_trait]
impl PageCheck<ProductsPage> for NoOutOfStock {
    async fn check(&self, view: &ProductsPage, _page: u32) -> VitrinaResult<Vec<String>> {
        if view.has_out_of_stock_products().await? {
            return Ok(vec![OUT_OF_STOCK_ERROR.to_string()]);
        }
        Ok(Vec::new())
    }
}

/// Every product name contains one of the keywords
#[derive(Debug, Clone, Copy)]
pub struct NamesContainKeywords<'a> {
    pub keywords: &'a [&'a str],
}

#[async_trait]
impl PageCheck<ProductsPage> for NamesContainKeywords<'_> {
    async fn check(&self, view: &ProductsPage, _page: u32) -> VitrinaResult<Vec<String>> {
        let invalid = view.invalid_product_names(self.keywords).await?;
        if invalid.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![format!(
            "Found products without keywords: {}",
            invalid.join(", ")
        )])
    }
}

/// Every listed product carries an eco badge
#[derive(Debug, Clone, Copy, Default)]
pub struct AllEcoBadged;

#[async_trait]
impl PageCheck<ProductsPage> for AllEcoBadged {
    async fn check(&self, view: &ProductsPage, _page: u32) -> VitrinaResult<Vec<String>> {
        if view.all_products_eco_badged().await? {
            return Ok(Vec::new());
        }
        Ok(vec![ECO_BADGE_ERROR.to_string()])
    }
}

pub async fn validate_no_out_of_stock(
    page: &ProductsPage,
    max_pages: u32,
) -> VitrinaResult<TraversalReport> {
    validate_across_pages(page, max_pages, &NoOutOfStock).await
}

pub async fn validate_keywords(
    page: &ProductsPage,
    keywords: &[&str],
    max_pages: u32,
) -> VitrinaResult<TraversalReport> {
    validate_across_pages(page, max_pages, &NamesContainKeywords { keywords }).await
}

pub async fn validate_eco_badges(
    page: &ProductsPage,
    max_pages: u32,
) -> VitrinaResult<TraversalReport> {
    validate_across_pages(page, max_pages, &AllEcoBadged).await
}

/// A brand filter must list something, and nothing listed may be out of stock
pub async fn validate_brand_products(
    page: &ProductsPage,
    brand: Brand,
    max_pages: u32,
) -> VitrinaResult<Vec<String>> {
    if page.current_page_product_count().await? == 0 {
        return Ok(vec![format!("No products found for brand \"{brand}\"")]);
    }
    Ok(validate_no_out_of_stock(page, max_pages).await?.errors)
}

/// Either every listed name matches the subcategory keywords, or nothing is
/// listed and the "no results" message says so
pub async fn validate_subcategory_results(
    page: &ProductsPage,
    subcategory: Subcategory,
    max_pages: u32,
) -> VitrinaResult<Vec<String>> {
    if !page.has_products_visible().await? {
        if page.filter().has_no_results().await? {
            return Ok(Vec::new());
        }
        return Ok(vec![format!(
            "No products found for subcategory \"{subcategory}\" but no \"no results\" message visible"
        )]);
    }
    Ok(validate_keywords(page, subcategory.keywords(), max_pages)
        .await?
        .errors)
}

/// The first product after category + brand filtering belongs to the category
pub async fn validate_multiple_filters_basic(
    page: &ProductsPage,
    selection: FilterSelection,
) -> VitrinaResult<Vec<String>> {
    let FilterSelection { category, brand } = selection;
    page.wait_for_initial_products_load().await?;
    if !page.has_products_visible().await? {
        return Ok(vec![format!("No products visible for {category} + {brand}")]);
    }
    let first = page.first_product_name().await?;
    let keywords = category.keywords();
    if product_matches_keywords(&first, keywords) {
        return Ok(Vec::new());
    }
    Ok(vec![format!(
        "Product \"{first}\" does not match category \"{category}\" keywords: {}",
        keywords.join(", ")
    )])
}

/// [`validate_multiple_filters_basic`], then open the first product when clean
pub async fn validate_multiple_filters_and_navigate(
    page: &ProductsPage,
    selection: FilterSelection,
) -> VitrinaResult<Vec<String>> {
    let errors = validate_multiple_filters_basic(page, selection).await?;
    if errors.is_empty() {
        page.open_first_product().await?;
    }
    Ok(errors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::components::{FilterComponent, PaginationComponent};
    use crate::config::SuiteConfig;
    use crate::driver::{MockDom, MockDriver, MockNode};
    use crate::session::Session;
    use crate::traversal::page_limit_message;
    use std::sync::Arc;

    type Listing = &'static [&'static [&'static str]];

    fn show_page(dom: &mut MockDom, pages: Listing, oos_on: &[usize], index: usize) {
        dom.set(
            &ProductsPage::product_names(),
            pages[index].iter().map(|n| MockNode::new(*n)).collect(),
        );
        dom.set(
            &ProductsPage::product_cards(),
            pages[index].iter().map(|n| MockNode::new(*n)).collect(),
        );
        if oos_on.contains(&index) {
            dom.set(&ProductsPage::out_of_stock_labels(), vec![MockNode::new("Out of stock")]);
        } else {
            dom.remove(&ProductsPage::out_of_stock_labels());
        }
        dom.set(
            &PaginationComponent::active_page(),
            vec![MockNode::new((index + 1).to_string())],
        );
        let next = if index + 1 == pages.len() {
            MockNode::new("»").within("li", "disabled")
        } else {
            MockNode::new("»")
        };
        dom.set(&PaginationComponent::next_button(), vec![next]);
    }

    /// A paginated listing whose "Next" click renders the following page
    fn listing(pages: Listing, oos_on: &'static [usize]) -> (Arc<MockDriver>, ProductsPage) {
        let driver = Arc::new(MockDriver::new());
        driver.with_dom(|dom| show_page(dom, pages, oos_on, 0));
        driver.on_action(&PaginationComponent::next_button().first(), move |dom| {
            let current: usize = dom
                .resolve(&PaginationComponent::active_page())
                .first()
                .and_then(|n| n.text.parse().ok())
                .unwrap_or(1);
            show_page(dom, pages, oos_on, current.min(pages.len() - 1));
        });
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, session.products())
    }

    const HAND_TOOLS: Listing = &[
        &["Combination Pliers", "Claw Hammer"],
        &["Wood Saw", "Adjustable Wrench"],
        &["Bolt Cutters"],
    ];

    mod stock_tests {
        use super::*;

        #[tokio::test]
        async fn test_clean_brand_across_pages() {
            let (driver, page) = listing(HAND_TOOLS, &[]);
            let errors = validate_brand_products(&page, Brand::ForgeFlexTools, 10)
                .await
                .unwrap();
            assert!(errors.is_empty());
            assert_eq!(driver.calls("click:a[aria-label=\"Next\"]"), 2);
        }

        #[tokio::test]
        async fn test_out_of_stock_reported_per_page() {
            let (_driver, page) = listing(HAND_TOOLS, &[0, 2]);
            let report = validate_no_out_of_stock(&page, 10).await.unwrap();
            assert_eq!(report.pages_visited, 3);
            assert_eq!(report.errors, vec![OUT_OF_STOCK_ERROR, OUT_OF_STOCK_ERROR]);
        }

        #[tokio::test]
        async fn test_guard_hit_is_an_error_entry() {
            let (_driver, page) = listing(HAND_TOOLS, &[]);
            let report = validate_no_out_of_stock(&page, 2).await.unwrap();
            assert_eq!(report.pages_visited, 2);
            assert_eq!(report.errors, vec![page_limit_message(2)]);
        }

        #[tokio::test]
        async fn test_empty_brand_is_single_error() {
            let driver = Arc::new(MockDriver::new());
            let page = Session::new(driver, SuiteConfig::fast()).products();
            let errors = validate_brand_products(&page, Brand::MightyCraftHardware, 10)
                .await
                .unwrap();
            assert_eq!(errors, vec!["No products found for brand \"MightyCraft Hardware\""]);
        }
    }

    mod keyword_tests {
        use super::*;

        #[tokio::test]
        async fn test_keyword_violations_listed_by_page() {
            let (_driver, page) = listing(HAND_TOOLS, &[]);
            let report = validate_keywords(&page, &["Pliers", "Saw", "Cutters"], 10)
                .await
                .unwrap();
            assert_eq!(
                report.errors,
                vec![
                    "Found products without keywords: Claw Hammer",
                    "Found products without keywords: Adjustable Wrench",
                ]
            );
        }

        #[tokio::test]
        async fn test_category_keywords_accept_hand_tools() {
            let (_driver, page) = listing(HAND_TOOLS, &[]);
            let report = validate_keywords(&page, Category::HandTools.keywords(), 10)
                .await
                .unwrap();
            assert!(report.is_clean());
        }

        #[tokio::test]
        async fn test_subcategory_without_products_needs_message() {
            let driver = Arc::new(MockDriver::new());
            let page = Session::new(driver.clone(), SuiteConfig::fast()).products();
            let errors = validate_subcategory_results(&page, Subcategory::Grinder, 10)
                .await
                .unwrap();
            assert_eq!(
                errors,
                vec!["No products found for subcategory \"Grinder\" but no \"no results\" message visible"]
            );

            driver.set_element(&FilterComponent::no_results(), MockNode::new("There are no products found."));
            let errors = validate_subcategory_results(&page, Subcategory::Grinder, 10)
                .await
                .unwrap();
            assert!(errors.is_empty());
        }
    }

    mod eco_tests {
        use super::*;

        #[tokio::test]
        async fn test_missing_badges() {
            let (driver, page) = listing(&[&["Eco Hammer", "Plain Saw"]], &[]);
            driver.set_texts(&ProductsPage::eco_badges(), &["ECO"]);
            let report = validate_eco_badges(&page, 10).await.unwrap();
            assert_eq!(report.errors, vec![ECO_BADGE_ERROR]);
        }
    }

    mod multiple_filter_tests {
        use super::*;

        #[tokio::test]
        async fn test_first_product_must_match_category() {
            let (_driver, page) = listing(&[&["Sheet Sander"]], &[]);
            let selection = FilterSelection {
                category: Category::HandTools,
                brand: Brand::ForgeFlexTools,
            };
            let errors = validate_multiple_filters_basic(&page, selection).await.unwrap();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with(
                "Product \"Sheet Sander\" does not match category \"Hand Tools\" keywords: Hammer, Saw"
            ));
        }

        #[tokio::test]
        async fn test_clean_selection_opens_first_product() {
            let (driver, page) = listing(&[&["Cordless Drill 20V"]], &[]);
            driver.on_action(&ProductsPage::product_cards().first(), |dom| {
                dom.url = "https://practicesoftwaretesting.com/product/01J".to_string();
            });
            let selection = FilterSelection {
                category: Category::PowerTools,
                brand: Brand::MightyCraftHardware,
            };
            let errors = validate_multiple_filters_and_navigate(&page, selection)
                .await
                .unwrap();
            assert!(errors.is_empty());
            assert!(driver.was_called("click:a.card"));
        }
    }
}

//! Favorites list under "My account"

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageKind, PageObject};

#[derive(Debug, Clone)]
pub struct FavoritesPage {
    base: BasePage,
}

impl PageObject for FavoritesPage {
    const KIND: PageKind = PageKind::Favorites;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl FavoritesPage {
    #[must_use]
    pub fn product_names() -> Locator {
        Locator::test_id("product-name")
    }

    #[must_use]
    pub fn delete_button() -> Locator {
        Locator::test_id("delete").first()
    }

    #[must_use]
    pub fn empty_message() -> Locator {
        Locator::text("There are no favorites yet")
    }

    pub async fn wait_for_favorites(&self) -> VitrinaResult<()> {
        self.base
            .wait_visible(&Self::product_names(), self.base.config().timeouts.products_ms)
            .await
    }

    pub async fn favorite_names(&self) -> VitrinaResult<Vec<String>> {
        self.base.all_texts(&Self::product_names()).await
    }

    /// Delete the first favorite and wait until no product name remains
    pub async fn delete_first_favorite(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::delete_button()).await?;
        self.base
            .wait_detached(&Self::product_names(), self.base.config().timeouts.action_ms)
            .await
    }

    /// Whether the empty-list message is showing right now
    pub async fn is_empty(&self) -> VitrinaResult<bool> {
        self.base.driver().is_visible(&Self::empty_message()).await
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

    #[tokio::test]
    async fn test_delete_first_favorite_empties_list() {
        let driver = Arc::new(MockDriver::new());
        driver.set_texts(&FavoritesPage::product_names(), &["Combination Pliers"]);
        driver.set_texts(&Locator::test_id("delete"), &["x"]);
        driver.on_action(&FavoritesPage::delete_button(), |dom| {
            dom.remove(&FavoritesPage::product_names());
            dom.set(
                &FavoritesPage::empty_message(),
                vec![MockNode::new("There are no favorites yet")],
            );
        });
        let page = Session::new(driver.clone(), SuiteConfig::fast()).favorites();

        page.wait_for_favorites().await.unwrap();
        assert_eq!(page.favorite_names().await.unwrap(), vec!["Combination Pliers"]);
        assert!(!page.is_empty().await.unwrap());
        page.delete_first_favorite().await.unwrap();
        assert!(page.is_empty().await.unwrap());
    }
}

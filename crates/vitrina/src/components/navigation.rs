//! Header navigation: top-level links, category menu and language selector

use crate::catalog::{Category, Language};
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageObject};
use crate::wait::UrlPattern;

/// Storefront header
#[derive(Debug, Clone)]
pub struct NavigationBar {
    base: BasePage,
}

impl NavigationBar {
    #[must_use]
    pub fn new(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    #[must_use]
    pub fn language_select() -> Locator {
        Locator::test_id("language-select")
    }

    #[must_use]
    pub fn language_option(language: Language) -> Locator {
        Locator::test_id(language.option_test_id())
    }

    #[must_use]
    pub fn home_link() -> Locator {
        Locator::test_id("nav-home")
    }

    #[must_use]
    pub fn categories_link() -> Locator {
        Locator::test_id("nav-categories")
    }

    #[must_use]
    pub fn contact_link() -> Locator {
        Locator::test_id("nav-contact")
    }

    #[must_use]
    pub fn sign_in_link() -> Locator {
        Locator::test_id("nav-sign-in")
    }

    #[must_use]
    pub fn category_link(category: Category) -> Locator {
        Locator::test_id(category.nav_test_id())
    }

    pub async fn click_home(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::home_link()).await
    }

    pub async fn click_categories(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::categories_link()).await
    }

    pub async fn click_contact(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::contact_link()).await?;
        self.base.wait_for_url(&UrlPattern::glob("**/contact")).await
    }

    pub async fn click_sign_in(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::sign_in_link()).await?;
        self.base.wait_for_url(&UrlPattern::glob("**/auth/login")).await
    }

    /// Open the categories menu, pick `category` and wait for its listing URL
    pub async fn open_category(&self, category: Category) -> VitrinaResult<()> {
        self.click_categories().await?;
        self.base.safe_click(&Self::category_link(category)).await?;
        self.base
            .wait_for_url(&UrlPattern::glob(format!("**/category/{}", category.slug())))
            .await?;
        tracing::debug!(category = %category, "category opened");
        Ok(())
    }

    /// Switch the UI language and wait until the dropdown shows its code
    pub async fn change_language(&self, language: Language) -> VitrinaResult<()> {
        let budget = self.base.config().timeouts.language_ms;
        let select = Self::language_select();
        let option = Self::language_option(language);

        self.base.wait_visible(&select, budget).await?;
        self.base.driver().click(&select.clone().pick_first()).await?;
        self.base.wait_visible(&option, budget).await?;
        self.base.driver().click(&option.pick_first()).await?;

        let code = language.code();
        self.base
            .wait_for_text(&select, code, budget, |text| text.to_uppercase() == code)
            .await?;
        self.base.pause(self.base.config().timeouts.language_settle_ms).await;
        tracing::debug!(language = code, "language changed");
        Ok(())
    }

    /// Dropdown text, trimmed and upper-cased
    pub async fn current_language(&self) -> VitrinaResult<String> {
        let text = self.base.element_text(&Self::language_select()).await?;
        Ok(text.to_uppercase())
    }
}

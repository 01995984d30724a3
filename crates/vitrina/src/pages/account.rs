//! "My account" landing page and its user menu

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageKind, PageObject};
use crate::wait::UrlPattern;

#[derive(Debug, Clone)]
pub struct MyAccountPage {
    base: BasePage,
}

impl PageObject for MyAccountPage {
    const KIND: PageKind = PageKind::MyAccount;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl MyAccountPage {
    #[must_use]
    pub fn user_menu() -> Locator {
        Locator::test_id("nav-menu")
    }

    #[must_use]
    pub fn favorites_link() -> Locator {
        Locator::test_id("nav-my-favorites")
    }

    #[must_use]
    pub fn profile_link() -> Locator {
        Locator::test_id("nav-my-profile")
    }

    pub async fn wait_for_user_name(&self) -> VitrinaResult<()> {
        self.base
            .wait_visible(&Self::user_menu(), self.base.config().timeouts.action_ms)
            .await
    }

    /// Signed-in user's display name
    pub async fn user_name(&self) -> VitrinaResult<String> {
        self.base.element_text(&Self::user_menu()).await
    }

    pub async fn open_user_menu(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::user_menu()).await
    }

    /// User menu, then "My profile"
    pub async fn open_profile(&self) -> VitrinaResult<()> {
        self.open_user_menu().await?;
        self.base.safe_click(&Self::profile_link()).await?;
        self.base
            .wait_for_url(&UrlPattern::glob("**/account/profile"))
            .await
    }

    pub async fn go_to_favorites(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::favorites_link()).await?;
        self.base
            .wait_for_url(&UrlPattern::glob("**/account/favorites"))
            .await
    }
}

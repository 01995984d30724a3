//! Account profile form

use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageKind, PageObject};
use crate::config::ms;
use crate::wait::{poll_until, ElementState};

/// Profile page under "My account"
#[derive(Debug, Clone)]
pub struct ProfilePage {
    base: BasePage,
}

impl PageObject for ProfilePage {
    const KIND: PageKind = PageKind::Profile;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl ProfilePage {
    #[must_use]
    pub fn first_name_field() -> Locator {
        Locator::test_id("first-name")
    }

    #[must_use]
    pub fn last_name_field() -> Locator {
        Locator::test_id("last-name")
    }

    #[must_use]
    pub fn email_field() -> Locator {
        Locator::test_id("email")
    }

    #[must_use]
    pub fn phone_field() -> Locator {
        Locator::test_id("phone")
    }

    #[must_use]
    pub fn update_button() -> Locator {
        Locator::test_id("update-profile-submit")
    }

    #[must_use]
    pub fn success_banner() -> Locator {
        Locator::role("alert").with_text_ignore_case("successfully updated")
    }

    #[must_use]
    pub fn phone_error_banner() -> Locator {
        Locator::role("alert")
            .with_text_ignore_case("phone field must not be greater than 24 characters")
    }

    /// The form re-renders once its data arrives and nothing marks that, so
    /// a visible phone field is followed by the configured settle pause
    pub async fn wait_for_profile_data(&self) -> VitrinaResult<()> {
        let timeouts = self.base.config().timeouts;
        self.base
            .wait_visible(&Self::phone_field(), timeouts.action_ms)
            .await?;
        self.base.pause(timeouts.profile_settle_ms).await;
        Ok(())
    }

    pub async fn fill_phone(&self, phone: &str) -> VitrinaResult<()> {
        self.base.safe_fill(&Self::phone_field(), phone).await
    }

    pub async fn submit(&self) -> VitrinaResult<()> {
        self.base.safe_click(&Self::update_button()).await
    }

    /// Wait for the form, replace the phone number and submit
    pub async fn update_phone_number(&self, phone: &str) -> VitrinaResult<()> {
        self.wait_for_profile_data().await?;
        self.fill_phone(phone).await?;
        self.submit().await
    }

    pub async fn current_phone(&self) -> VitrinaResult<String> {
        self.base.input_value(&Self::phone_field()).await
    }

    /// Whether the phone field reads `expected` within the action budget.
    ///
    /// A rejected update is rolled back by the form after the error shows, so
    /// the value is polled rather than read once.
    pub async fn phone_settles_to(&self, expected: &str) -> VitrinaResult<bool> {
        let config = self.base.config();
        let field = Self::phone_field();
        self.base
            .wait_visible(&field, config.timeouts.action_ms)
            .await?;
        let driver = self.base.driver();
        let target = field.pick_first();
        let target = &target;
        poll_until(
            ms(config.timeouts.action_ms),
            config.poll_interval(),
            move || async move { Ok(driver.input_value(target).await? == expected) },
        )
        .await
    }

    /// Expected-absence probe for the success banner
    pub async fn success_visible(&self) -> VitrinaResult<bool> {
        self.base
            .appears_within(
                &Self::success_banner(),
                ElementState::Visible,
                self.base.config().timeouts.action_ms,
            )
            .await
    }

    /// Expected-absence probe for the phone-length error banner
    pub async fn phone_error_visible(&self) -> VitrinaResult<bool> {
        self.base
            .appears_within(
                &Self::phone_error_banner(),
                ElementState::Visible,
                self.base.config().timeouts.action_ms,
            )
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::{INVALID_PHONE_UPDATE, VALID_PHONE_UPDATE};
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockNode};
    use crate::session::Session;
    use std::sync::Arc;

    fn setup_with(config: SuiteConfig) -> (Arc<MockDriver>, ProfilePage) {
        let driver = Arc::new(MockDriver::new());
        driver.set_element(&ProfilePage::phone_field(), MockNode::input("3384518349"));
        driver.set_element(&ProfilePage::update_button(), MockNode::new("Update Profile"));
        let session = Session::new(driver.clone(), config);
        (driver, session.profile())
    }

    fn setup() -> (Arc<MockDriver>, ProfilePage) {
        setup_with(SuiteConfig::fast())
    }

    #[tokio::test]
    async fn test_update_settles_then_fills_and_submits() {
        let mut config = SuiteConfig::fast();
        config.timeouts.profile_settle_ms = 25;
        let (driver, page) = setup_with(config);
        page.update_phone_number(VALID_PHONE_UPDATE).await.unwrap();
        let history = driver.history();
        let pause = history.iter().position(|c| c == "pause:25").unwrap();
        let fill = history.iter().position(|c| c.starts_with("fill:")).unwrap();
        let click = history.iter().position(|c| c.starts_with("click:")).unwrap();
        assert!(pause < fill && fill < click);
        assert_eq!(page.current_phone().await.unwrap(), VALID_PHONE_UPDATE);
    }

    #[tokio::test]
    async fn test_phone_settles_after_rollback() {
        let (driver, page) = setup();
        driver.on_action(&ProfilePage::update_button().first(), |dom| {
            dom.nodes_mut(&ProfilePage::phone_field())[0].value = VALID_PHONE_UPDATE.to_string();
        });
        page.update_phone_number(INVALID_PHONE_UPDATE).await.unwrap();
        assert!(page.phone_settles_to(VALID_PHONE_UPDATE).await.unwrap());
    }

    #[tokio::test]
    async fn test_phone_settles_times_out_as_false() {
        let (_driver, page) = setup();
        page.update_phone_number(INVALID_PHONE_UPDATE).await.unwrap();
        assert!(!page.phone_settles_to(VALID_PHONE_UPDATE).await.unwrap());
        assert_eq!(page.current_phone().await.unwrap(), INVALID_PHONE_UPDATE);
    }

    #[tokio::test]
    async fn test_banners_are_probes() {
        let (driver, page) = setup();
        driver.on_action(&ProfilePage::update_button().first(), |dom| {
            dom.set(
                &ProfilePage::phone_error_banner(),
                vec![MockNode::new("The phone field must not be greater than 24 characters.")],
            );
        });
        page.update_phone_number(INVALID_PHONE_UPDATE).await.unwrap();
        assert!(page.phone_error_visible().await.unwrap());
        assert!(!page.success_visible().await.unwrap());
    }
}

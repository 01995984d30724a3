//! Registration and sign-in forms

use crate::catalog::UserProfile;
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageKind, PageObject};
use crate::wait::UrlPattern;

// =============================================================================
// SIGN UP
// =============================================================================

/// Customer registration form
#[derive(Debug, Clone)]
pub struct SignUpPage {
    base: BasePage,
}

impl PageObject for SignUpPage {
    const KIND: PageKind = PageKind::SignUp;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl SignUpPage {
    #[must_use]
    pub fn country_select() -> Locator {
        Locator::css("#country")
    }

    #[must_use]
    pub fn register_button() -> Locator {
        Locator::role_named("button", "Register")
    }

    /// Text fields keyed by placeholder, paired with the profile value
    fn text_fields(user: &UserProfile) -> [(&'static str, &str); 10] {
        [
            ("First name *", user.first_name.as_str()),
            ("Your last name *", user.last_name.as_str()),
            ("YYYY-MM-DD", user.date_of_birth.as_str()),
            ("Your Street *", user.address.as_str()),
            ("Your Postcode *", user.postcode.as_str()),
            ("Your City *", user.city.as_str()),
            ("Your State *", user.state.as_str()),
            ("Your phone *", user.phone.as_str()),
            ("Your email *", user.email.as_str()),
            ("Your password", user.password.as_str()),
        ]
    }

    pub async fn navigate(&self) -> VitrinaResult<()> {
        let config = self.base.config();
        self.base.navigate_to(&config.url(&config.routes.sign_up)).await
    }

    /// Fill every field, pick the country, register and wait for the login
    /// redirect
    pub async fn complete_registration(&self, user: &UserProfile) -> VitrinaResult<()> {
        for (placeholder, value) in Self::text_fields(user) {
            self.base
                .safe_fill(&Locator::placeholder(placeholder), value)
                .await?;
        }
        let country = Self::country_select();
        self.base
            .wait_visible(&country, self.base.config().timeouts.action_ms)
            .await?;
        self.base
            .driver()
            .select_option(&country.pick_first(), &user.country)
            .await?;
        self.base.safe_click(&Self::register_button()).await?;
        self.base
            .wait_for_url_within(
                &UrlPattern::glob("**/auth/login"),
                self.base.config().timeouts.registration_ms,
            )
            .await?;
        tracing::info!(email = %user.email, "user registered");
        Ok(())
    }
}

// =============================================================================
// SIGN IN
// =============================================================================

/// Login form
#[derive(Debug, Clone)]
pub struct SignInPage {
    base: BasePage,
}

impl PageObject for SignInPage {
    const KIND: PageKind = PageKind::SignIn;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

impl SignInPage {
    #[must_use]
    pub fn email_field() -> Locator {
        Locator::placeholder("Your email")
    }

    #[must_use]
    pub fn password_field() -> Locator {
        Locator::placeholder("Your password")
    }

    #[must_use]
    pub fn login_button() -> Locator {
        Locator::css("input.btnSubmit")
    }

    pub async fn navigate(&self) -> VitrinaResult<()> {
        let config = self.base.config();
        self.base.navigate_to(&config.url(&config.routes.sign_in)).await
    }

    /// Submit credentials and wait for the account page
    pub async fn log_in(&self, email: &str, password: &str) -> VitrinaResult<()> {
        self.base.safe_fill(&Self::email_field(), email).await?;
        self.base
            .safe_fill(&Self::password_field(), password)
            .await?;
        self.base.safe_click(&Self::login_button()).await?;
        self.base.wait_for_url(&UrlPattern::glob("**/account")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::catalog::generate_valid_user;
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockNode};
    use crate::session::Session;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_registration_fills_all_fields_and_country() {
        let driver = Arc::new(MockDriver::new());
        let user = generate_valid_user();
        for (placeholder, _) in SignUpPage::text_fields(&user) {
            driver.set_element(&Locator::placeholder(placeholder), MockNode::input(""));
        }
        driver.set_element(&SignUpPage::country_select(), MockNode::input(""));
        driver.set_element(&SignUpPage::register_button(), MockNode::new("Register"));
        driver.on_action(&SignUpPage::register_button().first(), |dom| {
            dom.url = "https://practicesoftwaretesting.com/auth/login".to_string();
        });
        let session = Session::new(driver.clone(), SuiteConfig::fast());
        let page = session.sign_up();

        page.navigate().await.unwrap();
        page.complete_registration(&user).await.unwrap();
        assert_eq!(driver.calls("fill:"), 10);
        assert!(driver.was_called("select:#country"));
        let email = session
            .base()
            .input_value(&Locator::placeholder("Your email *"))
            .await
            .unwrap();
        assert_eq!(email, user.email);
    }

    #[tokio::test]
    async fn test_login_waits_for_account_url() {
        let driver = Arc::new(MockDriver::new());
        driver.set_element(&SignInPage::email_field(), MockNode::input(""));
        driver.set_element(&SignInPage::password_field(), MockNode::input(""));
        driver.set_element(&SignInPage::login_button(), MockNode::new("Login"));
        driver.on_action(&SignInPage::login_button().first(), |dom| {
            dom.url = "https://practicesoftwaretesting.com/account".to_string();
        });
        let page = Session::new(driver.clone(), SuiteConfig::fast()).sign_in();
        page.log_in("someone@yopmail.com", "Cn20nH1]").await.unwrap();
        assert!(driver.was_called("fill:[placeholder=\"Your password\"]"));
    }
}

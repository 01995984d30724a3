//! Storefront scenarios over a [`Session`]
//!
//! These are driver-agnostic; `vitrina ui` runs them against Chromium.

use vitrina::catalog::{INVALID_PHONE_UPDATE, VALID_PHONE_UPDATE};
use vitrina::flows;
use vitrina::validation::filters::{
    validate_brand_products, validate_eco_badges, validate_keywords, validate_subcategory_results,
};
use vitrina::validation::translation::{
    validate_form_translations, validate_labels_and_text, validate_navigation_elements,
};
use tracing::instrument;
use vitrina::{Brand, Category, Language, Session, Subcategory, VitrinaResult};

/// Brand filter lists products and none of them are out of stock
#[instrument(parent = session.span(), skip(session))]
pub async fn brand_stock(
    session: &Session,
    brand: Brand,
    max_pages: u32,
) -> VitrinaResult<Vec<String>> {
    let products = flows::filter_by_brand(session, brand).await?;
    validate_brand_products(&products, brand, max_pages).await
}

/// Every product in a category carries one of its keywords
#[instrument(parent = session.span(), skip(session))]
pub async fn category_keywords(
    session: &Session,
    category: Category,
    max_pages: u32,
) -> VitrinaResult<Vec<String>> {
    let products = flows::filter_by_category(session, category).await?;
    Ok(validate_keywords(&products, category.keywords(), max_pages)
        .await?
        .errors)
}

#[instrument(parent = session.span(), skip(session))]
pub async fn subcategory(
    session: &Session,
    subcategory: Subcategory,
    max_pages: u32,
) -> VitrinaResult<Vec<String>> {
    let products = flows::filter_by_subcategory(session, subcategory).await?;
    validate_subcategory_results(&products, subcategory, max_pages).await
}

#[instrument(parent = session.span(), skip(session))]
pub async fn eco_badges(session: &Session, max_pages: u32) -> VitrinaResult<Vec<String>> {
    let products = flows::filter_by_eco_friendly(session).await?;
    Ok(validate_eco_badges(&products, max_pages).await?.errors)
}

/// A fresh user accepts a valid phone number and is refused an overlong one,
/// which leaves the saved number in place
#[instrument(parent = session.span(), skip(session))]
pub async fn profile_phone(session: &Session) -> VitrinaResult<Vec<String>> {
    flows::create_and_login_user(session).await?;
    let profile = flows::update_profile_phone_number(session, VALID_PHONE_UPDATE).await?;

    let mut errors = Vec::new();
    if !profile.success_visible().await? {
        errors.push(format!(
            "No success message after updating phone to {VALID_PHONE_UPDATE}"
        ));
    }
    if !profile.phone_settles_to(VALID_PHONE_UPDATE).await? {
        errors.push(format!(
            "Phone field shows {:?} after updating to {VALID_PHONE_UPDATE}",
            profile.current_phone().await?
        ));
    }

    profile.update_phone_number(INVALID_PHONE_UPDATE).await?;
    if !profile.phone_error_visible().await? {
        errors.push(format!(
            "No phone length error after entering {} digits",
            INVALID_PHONE_UPDATE.len()
        ));
    }
    if !profile.phone_settles_to(VALID_PHONE_UPDATE).await? {
        errors.push(format!(
            "Phone field shows {:?} after a rejected update, expected {VALID_PHONE_UPDATE}",
            profile.current_phone().await?
        ));
    }
    Ok(errors)
}

/// Contact page texts match the chosen language
#[instrument(parent = session.span(), skip(session))]
pub async fn contact_language(session: &Session, language: Language) -> VitrinaResult<Vec<String>> {
    let (contact, expected) = flows::change_language_and_get_translations(session, language).await?;
    let mut errors = validate_navigation_elements(&contact, expected).await?;
    errors.extend(validate_form_translations(&contact, expected).await?);
    errors.extend(validate_labels_and_text(&contact, expected).await?);
    Ok(errors)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use vitrina::pages::{MyAccountPage, ProfilePage, SignInPage, SignUpPage};
    use vitrina::{Locator, MockDriver, MockNode, SuiteConfig};

    const BASE: &str = "https://practicesoftwaretesting.com";
    const PHONE_LIMIT: usize = 24;
    const SAVED: &str = "Your profile is successfully updated!";
    const TOO_LONG: &str = "The phone field must not be greater than 24 characters.";

    /// Registration, login and the account menu, ending on an empty profile form
    fn storefront() -> (Arc<MockDriver>, Session) {
        let driver = Arc::new(MockDriver::new());
        for placeholder in [
            "First name *",
            "Your last name *",
            "YYYY-MM-DD",
            "Your Street *",
            "Your Postcode *",
            "Your City *",
            "Your State *",
            "Your phone *",
            "Your email *",
            "Your password",
        ] {
            driver.set_element(&Locator::placeholder(placeholder), MockNode::input(""));
        }
        driver.set_element(&SignUpPage::country_select(), MockNode::input(""));
        driver.set_element(&SignUpPage::register_button(), MockNode::new("Register"));
        driver.on_action(&SignUpPage::register_button().first(), |dom| {
            dom.url = format!("{BASE}/auth/login");
        });
        driver.set_element(&SignInPage::email_field(), MockNode::input(""));
        driver.set_element(&SignInPage::login_button(), MockNode::input("Login"));
        driver.on_action(&SignInPage::login_button().first(), |dom| {
            dom.url = format!("{BASE}/account");
        });
        driver.set_element(&MyAccountPage::user_menu(), MockNode::new("Jane Doe"));
        driver.set_element(&MyAccountPage::profile_link(), MockNode::new("My profile"));
        driver.on_action(&MyAccountPage::profile_link().first(), |dom| {
            dom.url = format!("{BASE}/account/profile");
        });
        driver.set_element(&ProfilePage::phone_field(), MockNode::input("0987654321"));
        driver.set_element(&ProfilePage::update_button(), MockNode::new("Update Profile"));

        let session = Session::new(driver.clone(), SuiteConfig::fast());
        (driver, session)
    }

    fn show_banner(dom: &mut vitrina::driver::MockDom, banner: &Locator, text: &str) {
        dom.set(banner, vec![MockNode::new(text)]);
    }

    /// Saves numbers up to the length limit and restores the saved one otherwise
    fn validating_form(driver: &MockDriver) {
        let saved = Mutex::new(String::from("0987654321"));
        driver.on_action(&ProfilePage::update_button().first(), move |dom| {
            let field = &mut dom.nodes_mut(&ProfilePage::phone_field())[0];
            let mut saved = saved.lock().unwrap();
            if field.value.len() > PHONE_LIMIT {
                field.value = saved.clone();
                show_banner(dom, &ProfilePage::phone_error_banner(), TOO_LONG);
            } else {
                *saved = field.value.clone();
                show_banner(dom, &ProfilePage::success_banner(), SAVED);
            }
        });
    }

    #[tokio::test]
    async fn test_profile_phone_passes_on_validating_form() {
        let (driver, session) = storefront();
        validating_form(&driver);
        let errors = profile_phone(&session).await.unwrap();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[tokio::test]
    async fn test_profile_phone_reports_wrong_stored_value() {
        let (driver, session) = storefront();
        driver.on_action(&ProfilePage::update_button().first(), |dom| {
            dom.nodes_mut(&ProfilePage::phone_field())[0].value = "1111111111".to_string();
            show_banner(dom, &ProfilePage::success_banner(), SAVED);
            show_banner(dom, &ProfilePage::phone_error_banner(), TOO_LONG);
        });

        let errors = profile_phone(&session).await.unwrap();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert_eq!(
            errors[0],
            format!("Phone field shows \"1111111111\" after updating to {VALID_PHONE_UPDATE}")
        );
        assert!(errors[1].contains("after a rejected update"));
    }

    #[tokio::test]
    async fn test_profile_phone_reports_kept_invalid_number() {
        let (driver, session) = storefront();
        driver.on_action(&ProfilePage::update_button().first(), |dom| {
            let rejected = dom.nodes_mut(&ProfilePage::phone_field())[0].value.len() > PHONE_LIMIT;
            let (banner, text) = if rejected {
                (ProfilePage::phone_error_banner(), TOO_LONG)
            } else {
                (ProfilePage::success_banner(), SAVED)
            };
            show_banner(dom, &banner, text);
        });

        let errors = profile_phone(&session).await.unwrap();
        assert_eq!(
            errors,
            vec![format!(
                "Phone field shows {INVALID_PHONE_UPDATE:?} after a rejected update, \
                 expected {VALID_PHONE_UPDATE}"
            )]
        );
    }
}

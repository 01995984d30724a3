//! Contact form, used for translation checks

use crate::components::NavigationBar;
use crate::locator::Locator;
use crate::pages::BasePage;
use crate::result::VitrinaResult;
use crate::session::{PageContext, PageKind, PageObject};

/// Labelled fields of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
    Attachment,
}

impl ContactField {
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Subject,
        Self::Message,
        Self::Attachment,
    ];

    /// `for` attribute of the field's label
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
            Self::Attachment => "attachment",
        }
    }

    /// `data-test` id of the control; the attachment input has none
    #[must_use]
    pub const fn test_id(self) -> Option<&'static str> {
        match self {
            Self::FirstName => Some("first-name"),
            Self::LastName => Some("last-name"),
            Self::Email => Some("email"),
            Self::Subject => Some("subject"),
            Self::Message => Some("message"),
            Self::Attachment => None,
        }
    }
}

/// Contact page
#[derive(Debug, Clone)]
pub struct ContactPage {
    base: BasePage,
    navigation: NavigationBar,
}

impl PageObject for ContactPage {
    const KIND: PageKind = PageKind::Contact;

    fn from_context(ctx: PageContext) -> Self {
        Self {
            navigation: NavigationBar::new(ctx.clone()),
            base: BasePage::from_context(ctx),
        }
    }

    fn base(&self) -> &BasePage {
        &self.base
    }
}

/// Collapse whitespace runs to single spaces and trim
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl ContactPage {
    #[must_use]
    pub fn main_heading() -> Locator {
        Locator::css("h3")
    }

    #[must_use]
    pub fn label(field: ContactField) -> Locator {
        Locator::css(format!("label[for=\"{}\"]", field.id()))
    }

    #[must_use]
    pub fn input(field: ContactField) -> Option<Locator> {
        field.test_id().map(Locator::test_id)
    }

    #[must_use]
    pub fn subject_placeholder() -> Locator {
        Locator::css("[data-test=\"subject\"] option[selected]")
    }

    #[must_use]
    pub fn submit_button() -> Locator {
        Locator::test_id("contact-submit")
    }

    #[must_use]
    pub fn warning_label() -> Locator {
        Locator::css("#attachmentHelp")
    }

    /// Paragraph linking the project repository, in any language
    #[must_use]
    pub fn info_label() -> Locator {
        Locator::css("p").has(Locator::css(
            "a[href*=\"github.com/testsmith-io/practice-software-testing\"]",
        ))
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationBar {
        &self.navigation
    }

    /// Open the page and wait for the form
    pub async fn navigate(&self) -> VitrinaResult<()> {
        let config = self.base.config();
        self.base.navigate_to(&config.url(&config.routes.contact)).await?;
        let first_name = Locator::test_id("first-name");
        self.base
            .wait_visible(&first_name, config.timeouts.products_ms)
            .await
    }

    pub async fn normalized_info_text(&self) -> VitrinaResult<String> {
        let text = self.base.element_text(&Self::info_label()).await?;
        Ok(normalize_whitespace(&text))
    }

    pub async fn current_language(&self) -> VitrinaResult<String> {
        self.navigation.current_language().await
    }
}

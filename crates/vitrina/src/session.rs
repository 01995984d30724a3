//! Sessions and page construction
//!
//! A [`PageContext`] is built once per test session and handed to every page
//! and component constructor. There is no global registry: pages are
//! constructed explicitly from the context, and the closed [`PageKind`] enum
//! replaces lookup by arbitrary string.

use crate::config::SuiteConfig;
use crate::driver::BrowserDriver;
use crate::pages::{
    BasePage, CartPage, ContactPage, FavoritesPage, MyAccountPage, ProductDetailPage,
    ProductsPage, ProfilePage, SignInPage, SignUpPage,
};
use crate::result::{VitrinaError, VitrinaResult};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// Shared handles for one session: driver, configuration and id
#[derive(Debug, Clone)]
pub struct PageContext {
    driver: Arc<dyn BrowserDriver>,
    config: Arc<SuiteConfig>,
    session_id: Uuid,
}

impl PageContext {
    /// Build a context for a new session
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>, config: SuiteConfig) -> Self {
        Self {
            driver,
            config: Arc::new(config),
            session_id: Uuid::new_v4(),
        }
    }

    /// Browser capability
    #[must_use]
    pub fn driver(&self) -> &dyn BrowserDriver {
        self.driver.as_ref()
    }

    /// Injected configuration
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Session identifier used in log spans
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }
}

/// Trait for page objects representing one logical screen
pub trait PageObject: Sized {
    /// Which screen this is
    const KIND: PageKind;

    /// Construct from a session context
    fn from_context(ctx: PageContext) -> Self;

    /// Shared waits and actions
    fn base(&self) -> &BasePage;

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &'static str {
        Self::KIND.name()
    }
}

/// Closed set of page types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Base,
    Products,
    ProductDetail,
    Cart,
    Contact,
    Profile,
    Favorites,
    MyAccount,
    SignIn,
    SignUp,
}

impl PageKind {
    /// Every page kind
    pub const ALL: [Self; 10] = [
        Self::Base,
        Self::Products,
        Self::ProductDetail,
        Self::Cart,
        Self::Contact,
        Self::Profile,
        Self::Favorites,
        Self::MyAccount,
        Self::SignIn,
        Self::SignUp,
    ];

    /// Stable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Products => "products",
            Self::ProductDetail => "product-detail",
            Self::Cart => "cart",
            Self::Contact => "contact",
            Self::Profile => "profile",
            Self::Favorites => "favorites",
            Self::MyAccount => "my-account",
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
        }
    }

    /// Absolute URL for pages reachable directly; `None` for pages reached by
    /// clicking through (a product detail needs a product id)
    #[must_use]
    pub fn url(self, config: &SuiteConfig) -> Option<String> {
        let routes = &config.routes;
        let route: &str = match self {
            Self::Base | Self::Products => "",
            Self::ProductDetail => return None,
            Self::Cart => &routes.cart,
            Self::Contact => &routes.contact,
            Self::Profile => &routes.profile,
            Self::Favorites => &routes.favorites,
            Self::MyAccount => &routes.account,
            Self::SignIn => &routes.sign_in,
            Self::SignUp => &routes.sign_up,
        };
        Some(config.url(route))
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageKind {
    type Err = VitrinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| VitrinaError::unsupported("Page", s))
    }
}

/// One isolated test session
#[derive(Debug, Clone)]
pub struct Session {
    ctx: PageContext,
    span: Span,
}

impl Session {
    /// Start a session over a driver.
    ///
    /// The session's `info` span carries its id; workflows and scenarios
    /// record their own spans under it.
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>, config: SuiteConfig) -> Self {
        let ctx = PageContext::new(driver, config);
        let span = tracing::info_span!("session", id = %ctx.session_id());
        span.in_scope(|| tracing::debug!("session created"));
        Self { ctx, span }
    }

    /// Span that parents everything done in this session
    #[must_use]
    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Shared context
    #[must_use]
    pub const fn context(&self) -> &PageContext {
        &self.ctx
    }

    /// Injected configuration
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        self.ctx.config()
    }

    /// Construct any page object
    #[must_use]
    pub fn page<P: PageObject>(&self) -> P {
        P::from_context(self.ctx.clone())
    }

    /// Navigate to a page kind's URL with bounded retry
    pub async fn open(&self, kind: PageKind) -> VitrinaResult<()> {
        let url = kind.url(self.config()).ok_or_else(|| {
            VitrinaError::invalid_argument(format!("{kind} page has no direct URL"))
        })?;
        self.base().navigate_to(&url).await
    }

    #[must_use]
    pub fn base(&self) -> BasePage {
        self.page()
    }

    #[must_use]
    pub fn products(&self) -> ProductsPage {
        self.page()
    }

    #[must_use]
    pub fn product_detail(&self) -> ProductDetailPage {
        self.page()
    }

    #[must_use]
    pub fn cart(&self) -> CartPage {
        self.page()
    }

    #[must_use]
    pub fn contact(&self) -> ContactPage {
        self.page()
    }

    #[must_use]
    pub fn profile(&self) -> ProfilePage {
        self.page()
    }

    #[must_use]
    pub fn favorites(&self) -> FavoritesPage {
        self.page()
    }

    #[must_use]
    pub fn my_account(&self) -> MyAccountPage {
        self.page()
    }

    #[must_use]
    pub fn sign_in(&self) -> SignInPage {
        self.page()
    }

    #[must_use]
    pub fn sign_up(&self) -> SignUpPage {
        self.page()
    }
}

//! Vitrina: page-object and booking-API test harness for the Toolshop storefront
//!
//! Two layers share one error type and one configuration:
//!
//! - a browser layer: [`Locator`]s describe elements, pages and components
//!   act on them through the [`BrowserDriver`] capability, and the
//!   [`traversal`] engine runs per-page checks across a paginated listing
//!   up to a page guard;
//! - an HTTP layer ([`api`]): pure request builders for the booking API, a
//!   timed client and structural schema checks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       VITRINA                                │
//! ├──────────────────────────────────────────────────────────────┤
//! │  flows ──► pages ──► components ──► BrowserDriver            │
//! │    │         │                       ├─ MockDriver (tests)   │
//! │    │         ▼                       └─ ChromiumDriver (CDP) │
//! │    │     traversal ◄── validation                            │
//! │    ▼                                                         │
//! │  api: BookingService ──► ApiClient (reqwest) ──► schema      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod api;
pub mod catalog;
pub mod components;
pub mod config;
pub mod driver;
pub mod flows;
pub mod locator;
pub mod pages;
pub mod result;
pub mod session;
pub mod traversal;
pub mod validation;
pub mod wait;

/// Chromium backend (feature `browser`)
#[cfg(feature = "browser")]
pub mod cdp;

pub use api::{ApiClient, ApiRequest, BookingClient, BookingService, TimedResponse};
pub use catalog::{Brand, Category, FilterSelection, Language, Subcategory, UserProfile};
pub use config::SuiteConfig;
pub use driver::{BrowserDriver, MockDriver, MockNode};
pub use locator::Locator;
pub use result::{VitrinaError, VitrinaResult};
pub use session::{PageContext, PageKind, PageObject, Session};
pub use traversal::{PageCheck, PagedResults, TraversalReport};
pub use wait::{ElementState, LoadState, UrlPattern};

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;

/// Prelude for scenario code
pub mod prelude {
    pub use crate::catalog::*;
    pub use crate::flows;
    pub use crate::pages::*;
    pub use crate::traversal::{validate_across_pages, PageCheck, PagedResults, TraversalReport};
    pub use crate::validation::{cart::*, filters::*, translation::*};
    pub use crate::{
        Locator, MockDriver, PageObject, Session, SuiteConfig, VitrinaError, VitrinaResult,
    };
}

//! Page objects, one per storefront screen.
//!
//! Every page is built from a [`PageContext`](crate::session::PageContext)
//! through [`PageObject::from_context`](crate::session::PageObject) and owns a
//! [`BasePage`] for the shared waits and actions.

mod account;
mod auth;
mod base;
mod cart;
mod contact;
mod favorites;
mod product_detail;
mod products;
mod profile;

pub use account::MyAccountPage;
pub use auth::{SignInPage, SignUpPage};
pub use base::BasePage;
pub use cart::CartPage;
pub use contact::{normalize_whitespace, ContactField, ContactPage};
pub use favorites::FavoritesPage;
pub use product_detail::ProductDetailPage;
pub use products::{product_matches_keywords, ProductsPage};
pub use profile::ProfilePage;

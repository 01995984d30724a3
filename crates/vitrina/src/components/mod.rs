//! Reusable page fragments shared by several pages.
//!
//! Each component wraps a [`BasePage`](crate::pages::BasePage) over the same
//! session context as the page that composes it.

mod filter;
mod navigation;
mod pagination;
mod search;

pub use filter::FilterComponent;
pub use navigation::NavigationBar;
pub use pagination::PaginationComponent;
pub use search::SearchComponent;

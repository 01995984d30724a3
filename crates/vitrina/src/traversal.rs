//! Pagination-bounded traversal.
//!
//! Walks a paginated result view page by page, runs a per-page collector and
//! stops either when no enabled "next" control remains or when the guard
//! limit is reached. The loop is:
//!
//! 1. wait for the current page to settle
//! 2. visit it
//! 3. stop if there is no next page
//! 4. stop and flag the guard if this was page `max_pages`
//! 5. advance and repeat
//!
//! so a view with `n` pages is visited `min(n, max_pages)` times and the
//! guard flag is set exactly when pages remained unvisited.
//!
//! ```
//! use vitrina::traversal::page_limit_message;
//!
//! assert_eq!(
//!     page_limit_message(10),
//!     "Reached maximum page limit (10) - possible infinite loop"
//! );
//! ```

use crate::result::{VitrinaError, VitrinaResult};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A result view that can be walked one page at a time
#[async_trait]
pub trait PagedResults: Send + Sync {
    /// Wait until the current page's results are rendered
    async fn wait_until_settled(&self) -> VitrinaResult<()>;

    /// Whether an enabled "next" control exists
    async fn has_next_page(&self) -> VitrinaResult<bool>;

    /// Move to the next page and wait for the move to register
    async fn advance(&self) -> VitrinaResult<()>;
}

/// Per-page business rule producing human-readable violations.
///
/// A check reads the page; it must not change what the view shows.
#[async_trait]
pub trait PageCheck<V: ?Sized + Sync>: Send + Sync {
    async fn check(&self, view: &V, page: u32) -> VitrinaResult<Vec<String>>;
}

/// Per-page data extraction used by [`traverse`]
#[async_trait]
pub trait PageCollector<V: ?Sized + Sync>: Send + Sync {
    type Output: Send;

    async fn collect(&self, view: &V, page: u32) -> VitrinaResult<Self::Output>;
}

/// Result of a generic walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Traversal<T> {
    /// One entry per visited page, in order
    pub pages: Vec<T>,
    /// Whether the walk stopped at the guard with pages remaining
    pub limit_reached: bool,
}

impl<T> Traversal<T> {
    #[must_use]
    pub fn pages_visited(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// Outcome of [`validate_across_pages`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraversalReport {
    /// Check errors in page order, then the guard error if it tripped
    pub errors: Vec<String>,
    pub pages_visited: u32,
    pub limit_reached: bool,
}

impl TraversalReport {
    /// No violations and no guard hit
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The synthetic error appended when the guard trips
#[must_use]
pub fn page_limit_message(max_pages: u32) -> String {
    format!("Reached maximum page limit ({max_pages}) - possible infinite loop")
}

/// Walk `view`, collecting one value per page
pub async fn traverse<V, C>(
    view: &V,
    max_pages: u32,
    collector: &C,
) -> VitrinaResult<Traversal<C::Output>>
where
    V: PagedResults + ?Sized,
    C: PageCollector<V> + ?Sized,
{
    if max_pages == 0 {
        return Err(VitrinaError::invalid_argument(
            "max_pages must be at least 1",
        ));
    }

    let mut pages = Vec::new();
    let mut page = 1;
    let limit_reached = loop {
        view.wait_until_settled().await?;
        pages.push(collector.collect(view, page).await?);
        debug!(page, "page visited");

        if !view.has_next_page().await? {
            break false;
        }
        if page >= max_pages {
            warn!(max_pages, "page limit reached with pages remaining");
            break true;
        }
        view.advance().await?;
        page += 1;
    };

    Ok(Traversal {
        pages,
        limit_reached,
    })
}

struct Checking<'a, C: ?Sized>(&'a C);

#[async_trait]
impl<V, C> PageCollector<V> for Checking<'_, C>
where
    V: ?Sized + Sync,
    C: PageCheck<V> + ?Sized,
{
    type Output = Vec<String>;

    async fn collect(&self, view: &V, page: u32) -> VitrinaResult<Vec<String>> {
        self.0.check(view, page).await
    }
}

/// Run `check` on every page and gather its errors.
///
/// When the guard trips, exactly one [`page_limit_message`] entry is
/// appended after the check errors.
pub async fn validate_across_pages<V, C>(
    view: &V,
    max_pages: u32,
    check: &C,
) -> VitrinaResult<TraversalReport>
where
    V: PagedResults + ?Sized,
    C: PageCheck<V> + ?Sized,
{
    let walk = traverse(view, max_pages, &Checking(check)).await?;
    let pages_visited = walk.pages_visited();
    let limit_reached = walk.limit_reached;
    let mut errors: Vec<String> = walk.pages.into_iter().flatten().collect();
    if limit_reached {
        errors.push(page_limit_message(max_pages));
    }
    info!(
        pages_visited,
        errors = errors.len(),
        limit_reached,
        "pagination validation finished"
    );
    Ok(TraversalReport {
        errors,
        pages_visited,
        limit_reached,
    })
}

/// Sum of per-page counts over the visited pages
pub async fn count_items_across_pages<V, C>(
    view: &V,
    max_pages: u32,
    counter: &C,
) -> VitrinaResult<usize>
where
    V: PagedResults + ?Sized,
    C: PageCollector<V, Output = usize> + ?Sized,
{
    let walk = traverse(view, max_pages, counter).await?;
    Ok(walk.pages.iter().sum())
}

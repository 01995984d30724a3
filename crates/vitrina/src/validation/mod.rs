//! Business-rule checks built on pages and the pagination traversal.
//!
//! Checks report violations as human-readable strings. Page-level failures
//! such as timeouts still propagate as errors.

pub mod cart;
pub mod filters;
pub mod translation;

use crate::result::{VitrinaError, VitrinaResult};

/// Map "the element is not there" to `None`, keeping every other failure
pub(crate) fn found<T>(result: VitrinaResult<T>) -> VitrinaResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_timeout() || matches!(e, VitrinaError::ElementNotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

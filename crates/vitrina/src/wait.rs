//! Wait Mechanisms
//!
//! Settle conditions for asynchronous UI updates. Every wait carries an
//! explicit timeout and fails with [`VitrinaError::Timeout`] naming what was
//! awaited; nothing here sleeps for a fixed period as a stand-in for a
//! condition.

use crate::result::{VitrinaError, VitrinaResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Network idle threshold (500ms without new resource entries)
pub const NETWORK_IDLE_THRESHOLD_MS: u64 = 500;

// =============================================================================
// LOAD STATE
// =============================================================================

/// Document readiness reached by a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Wait for the `load` event to fire
    Load,
    /// Wait for `DOMContentLoaded` event
    #[default]
    DomContentLoaded,
    /// Wait for network to be idle (no requests for 500ms)
    NetworkIdle,
}

impl LoadState {
    /// Event name for this load state
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event_name())
    }
}

// =============================================================================
// ELEMENT STATE
// =============================================================================

/// Element state a wait resolves on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// Attached and rendered with a non-empty box
    Visible,
    /// Detached, or attached but not rendered
    Hidden,
    /// Present in the DOM
    Attached,
    /// Absent from the DOM
    Detached,
}

impl ElementState {
    /// Check the state against an observed (count, visible) pair
    #[must_use]
    pub const fn holds(&self, attached: bool, visible: bool) -> bool {
        match self {
            Self::Visible => attached && visible,
            Self::Hidden => !attached || !visible,
            Self::Attached => attached,
            Self::Detached => !attached,
        }
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::Attached => "attached",
            Self::Detached => "detached",
        })
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Poll `probe` until it yields `true` or `timeout` elapses.
///
/// The probe runs at least once even with a zero timeout. Returns `Ok(false)`
/// on expiry so the caller can build a timeout error with its own context;
/// probe errors propagate immediately.
pub async fn poll_until<F, Fut>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> VitrinaResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = VitrinaResult<bool>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if probe().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(interval.min(deadline - now)).await;
    }
}

/// [`poll_until`], failing with a timeout error on expiry
pub async fn wait_until<F, Fut>(
    what: &str,
    state: &str,
    timeout: Duration,
    interval: Duration,
    probe: F,
) -> VitrinaResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = VitrinaResult<bool>>,
{
    if poll_until(timeout, interval, probe).await? {
        Ok(())
    } else {
        Err(VitrinaError::timeout(what, state, timeout.as_millis() as u64))
    }
}

// =============================================================================
// URL PATTERNS
// =============================================================================

/// URL pattern for matching navigations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Contains substring
    Contains(String),
    /// Regex match
    Regex(String),
    /// Glob pattern (e.g., "**/account/profile")
    Glob(String),
}

impl UrlPattern {
    /// Glob pattern
    #[must_use]
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob(pattern.into())
    }

    /// Regex pattern
    #[must_use]
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Contains(pattern) => url.contains(pattern.as_str()),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
            Self::Glob(pattern) => Self::glob_matches(pattern, strip_query(url)),
        }
    }

    fn glob_matches(pattern: &str, url: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            // the final literal must end the URL, so search from the right
            let found = if i == parts.len() - 1 {
                url[pos..].rfind(part)
            } else {
                url[pos..].find(part)
            };
            match found {
                Some(found) if i == 0 && found != 0 => return false,
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }
        pattern.ends_with('*') || pos == url.len()
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(p) | Self::Glob(p) => f.write_str(p),
            Self::Contains(p) => write!(f, "*{p}*"),
            Self::Regex(p) => write!(f, "/{p}/"),
        }
    }
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

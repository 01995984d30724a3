//! Locator descriptions for element selection.
//!
//! A [`Locator`] is an immutable description of how to find elements: a chain
//! of selector steps, each optionally narrowed by text or `has` filters and an
//! nth index. It holds no live state; drivers resolve it against the current
//! document on every call, so a stale snapshot is never reused.
//!
//! ```
//! use vitrina::Locator;
//!
//! let card = Locator::css("a.card")
//!     .has(Locator::css("h5[data-test=\"product-name\"]").with_text("Bolt Cutters"))
//!     .first();
//! assert_eq!(
//!     card.to_string(),
//!     "a.card:has(h5[data-test=\"product-name\"]:has-text(\"Bolt Cutters\")) >> nth=0"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Element selector for a single step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Selector {
    /// CSS selector (e.g., "a.card")
    Css(String),
    /// Any element whose own text equals the given string
    Text(String),
    /// Form control by placeholder attribute
    Placeholder(String),
    /// ARIA role with an optional accessible-name substring (case-insensitive)
    Role {
        /// Role name ("button", "alert")
        role: String,
        /// Accessible name substring
        name: Option<String>,
    },
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => f.write_str(css),
            Self::Text(text) => write!(f, "text={text:?}"),
            Self::Placeholder(text) => write!(f, "[placeholder={text:?}]"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name:?}]"),
        }
    }
}

/// How a text filter compares element text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "text", rename_all = "snake_case")]
pub enum TextMatch {
    /// Substring of the trimmed text
    Contains(String),
    /// Case-insensitive substring
    ContainsIgnoreCase(String),
    /// Trimmed text equals exactly
    Exact(String),
}

impl TextMatch {
    /// Check element text against this filter
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let text = text.trim();
        match self {
            Self::Contains(needle) => text.contains(needle.as_str()),
            Self::ContainsIgnoreCase(needle) => {
                text.to_lowercase().contains(&needle.to_lowercase())
            }
            Self::Exact(expected) => text == expected,
        }
    }
}

/// Filter narrowing the matches of one step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    /// Element text matches
    HasText {
        /// Text comparison
        text: TextMatch,
    },
    /// Element contains a descendant matching the inner locator
    Has {
        /// Descendant locator
        inner: Locator,
    },
}

/// Positional pick among the matches of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nth {
    First,
    Last,
    Index(usize),
}

impl Nth {
    /// Resolve against a match count
    #[must_use]
    pub const fn resolve(self, len: usize) -> Option<usize> {
        match self {
            Self::First if len > 0 => Some(0),
            Self::Last if len > 0 => Some(len - 1),
            Self::Index(i) if i < len => Some(i),
            _ => None,
        }
    }
}

/// One step in a locator chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    /// Selector evaluated inside the previous step's matches
    pub selector: Selector,
    /// Filters applied in order
    pub filters: Vec<Filter>,
    /// Optional positional pick
    pub nth: Option<Nth>,
}

impl Step {
    const fn new(selector: Selector) -> Self {
        Self {
            selector,
            filters: Vec::new(),
            nth: None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        for filter in &self.filters {
            match filter {
                Filter::HasText {
                    text: TextMatch::Contains(t),
                } => write!(f, ":has-text({t:?})")?,
                Filter::HasText {
                    text: TextMatch::ContainsIgnoreCase(t),
                } => write!(f, ":has-text-i({t:?})")?,
                Filter::HasText {
                    text: TextMatch::Exact(t),
                } => write!(f, ":text-is({t:?})")?,
                Filter::Has { inner } => write!(f, ":has({inner})")?,
            }
        }
        match self.nth {
            None => Ok(()),
            Some(Nth::First) => f.write_str(" >> nth=0"),
            Some(Nth::Last) => f.write_str(" >> nth=-1"),
            Some(Nth::Index(i)) => write!(f, " >> nth={i}"),
        }
    }
}

/// Chainable element description
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    /// Start from a selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            steps: vec![Step::new(selector)],
        }
    }

    /// CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::Css(selector.into()))
    }

    /// `[data-test="<id>"]`
    #[must_use]
    pub fn test_id(id: impl AsRef<str>) -> Self {
        Self::css(format!("[data-test=\"{}\"]", id.as_ref()))
    }

    /// Element whose text equals `text`
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Selector::Text(text.into()))
    }

    /// Form control by placeholder
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::new(Selector::Placeholder(text.into()))
    }

    /// ARIA role without a name filter
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::new(Selector::Role {
            role: role.into(),
            name: None,
        })
    }

    /// ARIA role with an accessible-name substring
    #[must_use]
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Selector::Role {
            role: role.into(),
            name: Some(name.into()),
        })
    }

    /// Chain a CSS selector scoped to this locator's matches
    #[must_use]
    pub fn locator(mut self, css: impl Into<String>) -> Self {
        self.steps.push(Step::new(Selector::Css(css.into())));
        self
    }

    fn push_filter(mut self, filter: Filter) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.filters.push(filter);
        }
        self
    }

    fn set_nth(mut self, nth: Nth) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.nth = Some(nth);
        }
        self
    }

    /// Keep matches whose text contains `text`
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push_filter(Filter::HasText {
            text: TextMatch::Contains(text.into()),
        })
    }

    /// Keep matches whose text contains `text`, ignoring case
    #[must_use]
    pub fn with_text_ignore_case(self, text: impl Into<String>) -> Self {
        self.push_filter(Filter::HasText {
            text: TextMatch::ContainsIgnoreCase(text.into()),
        })
    }

    /// Keep matches whose trimmed text equals `text`
    #[must_use]
    pub fn with_exact_text(self, text: impl Into<String>) -> Self {
        self.push_filter(Filter::HasText {
            text: TextMatch::Exact(text.into()),
        })
    }

    /// Keep matches containing a descendant matching `inner`
    #[must_use]
    pub fn has(self, inner: Self) -> Self {
        self.push_filter(Filter::Has { inner })
    }

    /// First match
    #[must_use]
    pub fn first(self) -> Self {
        self.set_nth(Nth::First)
    }

    /// Last match
    #[must_use]
    pub fn last(self) -> Self {
        self.set_nth(Nth::Last)
    }

    /// First match, unless a positional pick is already set
    #[must_use]
    pub fn pick_first(self) -> Self {
        if self.steps.last().is_some_and(|s| s.nth.is_some()) {
            self
        } else {
            self.first()
        }
    }

    /// Match at `index`
    #[must_use]
    pub fn nth(self, index: usize) -> Self {
        self.set_nth(Nth::Index(index))
    }

    /// Selector chain
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Split off the trailing positional pick, if any
    #[must_use]
    pub fn split_nth(&self) -> (Self, Option<Nth>) {
        let mut base = self.clone();
        let nth = base.steps.last_mut().and_then(|s| s.nth.take());
        (base, nth)
    }

    /// Serialize for in-page resolution
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl From<&str> for Locator {
    fn from(css: &str) -> Self {
        Self::css(css)
    }
}

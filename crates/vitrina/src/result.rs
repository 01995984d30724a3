//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur in Vitrina
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// A wait condition never became true
    #[error("Timed out after {ms}ms waiting for {target} to be {state}")]
    Timeout {
        /// Locator or condition description
        target: String,
        /// Expected state
        state: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Element required by an action or query is not attached
    #[error("Element not found: {target}")]
    ElementNotFound {
        /// Locator description
        target: String,
    },

    /// Driver rejected an action
    #[error("{action} on {target} failed: {message}")]
    ActionFailed {
        /// Action name
        action: String,
        /// Locator description
        target: String,
        /// Error message
        message: String,
    },

    /// Unsupported category/brand/subcategory/language/page name
    #[error("{kind} \"{name}\" not supported")]
    UnsupportedName {
        /// Kind of name (Category, Brand, ...)
        kind: &'static str,
        /// Name that was rejected
        name: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Response body did not match its schema
    #[error("Schema validation failed: {message}")]
    Schema {
        /// Error message, prefixed with the JSON path
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Server returned an unexpected status
    #[error("API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Browser backend failure
    #[error("Driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl VitrinaError {
    /// Create a timeout error
    #[must_use]
    pub fn timeout(target: impl Into<String>, state: impl Into<String>, ms: u64) -> Self {
        Self::Timeout {
            target: target.into(),
            state: state.into(),
            ms,
        }
    }

    /// Create an action failure
    #[must_use]
    pub fn action(
        action: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ActionFailed {
            action: action.into(),
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported-name error
    #[must_use]
    pub fn unsupported(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnsupportedName {
            kind,
            name: name.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a schema error
    #[must_use]
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an assertion error
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this is a wait timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

//! Error types for proxy configuration.
//!
//! Configuration is deliberately lenient about credentials (an empty client
//! id is carried through to the provider as-is), so the errors here cover
//! only values that cannot be interpreted at all.
//!
//! # Example
//!
//! ```rust
//! use imweb_proxy::{AuthScopes, ConfigError};
//!
//! let result = "product".parse::<AuthScopes>();
//! assert!(matches!(result, Err(ConfigError::InvalidScopes { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ProxyConfig`](crate::ProxyConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The listen port is not a valid `u16`.
    #[error("Invalid port '{value}'. Expected a number between 0 and 65535.")]
    InvalidPort {
        /// The value that was provided.
        value: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A provider endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide an absolute http(s) URL (e.g., 'https://api.imweb.me').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The upstream timeout is not a whole number of seconds.
    #[error("Invalid upstream timeout '{value}'. Expected a positive number of seconds.")]
    InvalidTimeout {
        /// The value that was provided.
        value: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

//! OAuth-specific error types.
//!
//! # Example
//!
//! ```rust
//! use imweb_proxy::auth::oauth::OAuthError;
//!
//! let error = OAuthError::MissingAuthorizationCode;
//! assert_eq!(error.to_string(), "No authorization code in callback");
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur during the authorization code exchange.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The callback arrived without a `code` query parameter.
    ///
    /// No request is sent to the provider in this case.
    #[error("No authorization code in callback")]
    MissingAuthorizationCode,

    /// The provider accepted the request but the body carried no token.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// Description of the failure.
        message: String,
    },

    /// A provider call needed a token but none has been cached yet.
    #[error("No access token cached; complete the OAuth flow first")]
    MissingAccessToken,

    /// Transport or non-2xx failure talking to the token endpoint.
    #[error(transparent)]
    HttpError(#[from] HttpError),
}

impl OAuthError {
    /// Renders the failure detail the way the callback page reports it.
    ///
    /// Provider error bodies are echoed as compact JSON; everything else is
    /// rendered as a JSON string of the error message.
    ///
    /// ```rust
    /// use imweb_proxy::auth::oauth::OAuthError;
    /// use imweb_proxy::clients::{HttpError, HttpResponseError};
    ///
    /// let err = OAuthError::from(HttpError::from(HttpResponseError {
    ///     code: 400,
    ///     body: r#"{"error": "invalid_grant"}"#.to_string(),
    /// }));
    /// assert_eq!(err.detail(), r#"{"error":"invalid_grant"}"#);
    ///
    /// let err = OAuthError::MissingAuthorizationCode;
    /// assert_eq!(err.detail(), r#""No authorization code in callback""#);
    /// ```
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::HttpError(HttpError::Response(response)) => response.body_json().to_string(),
            other => serde_json::Value::String(other.to_string()).to_string(),
        }
    }
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

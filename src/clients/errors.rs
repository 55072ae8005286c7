//! HTTP error types for provider calls.
//!
//! - [`HttpResponseError`]: the provider answered with a non-2xx status
//! - [`HttpError`]: unified error covering transport and response failures
//!
//! # Example
//!
//! ```rust,ignore
//! use imweb_proxy::clients::HttpError;
//!
//! match client.get_json(&url, &token, &query).await {
//!     Ok(body) => println!("{body}"),
//!     Err(HttpError::Response(e)) => println!("provider said {}: {}", e.code, e.body),
//!     Err(HttpError::Network(e)) => println!("network error: {e}"),
//!     Err(HttpError::InvalidBody { message }) => println!("bad body: {message}"),
//! }
//! ```

use thiserror::Error;

/// The provider answered with a non-successful status.
///
/// `body` holds the raw response text; it is kept verbatim because it is
/// echoed back to the operator on a failed token exchange.
#[derive(Debug, Error)]
#[error("provider returned status {code}: {body}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The raw response body.
    pub body: String,
}

impl HttpResponseError {
    /// Returns the body as JSON when it parses, otherwise as a JSON string.
    ///
    /// ```rust
    /// use imweb_proxy::clients::HttpResponseError;
    ///
    /// let err = HttpResponseError { code: 400, body: r#"{ "error": "invalid_grant" }"#.to_string() };
    /// assert_eq!(err.body_json(), serde_json::json!({"error": "invalid_grant"}));
    ///
    /// let err = HttpResponseError { code: 502, body: "Bad Gateway".to_string() };
    /// assert_eq!(err.body_json(), serde_json::json!("Bad Gateway"));
    /// ```
    #[must_use]
    pub fn body_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|_| serde_json::Value::String(self.body.clone()))
    }
}

/// Unified error type for provider HTTP calls.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Non-2xx response.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Transport failure: connection refused, DNS, timeout, TLS.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered 2xx but the body was not the expected JSON.
    #[error("Invalid response body: {message}")]
    InvalidBody {
        /// What went wrong while decoding.
        message: String,
    },
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<HttpResponseError>();
};

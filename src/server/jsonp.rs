//! JSONP response shaping.
//!
//! The storefront loads `/stock` through a `<script>` tag, so every answer,
//! success or failure, is a `200 text/javascript` call of the caller-named
//! function. The callback name is checked against a safe identifier pattern
//! before it is interpolated into the script.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Function name used when the caller supplies none.
pub const DEFAULT_CALLBACK: &str = "callback";

/// Upper bound on accepted callback names.
const MAX_CALLBACK_LEN: usize = 128;

/// Content type of every JSONP answer.
pub const JAVASCRIPT_CONTENT_TYPE: &str = "text/javascript; charset=utf-8";

/// A validated JSONP callback name.
///
/// Accepts dotted JavaScript identifier paths such as `cb`, `$.handlers.stock`
/// or `jQuery3710_1700000000`.
///
/// ```rust
/// use imweb_proxy::server::JsonpCallback;
///
/// assert_eq!(JsonpCallback::from_query(None).as_ref(), "callback");
/// assert_eq!(JsonpCallback::from_query(Some("cb")).as_ref(), "cb");
/// assert_eq!(JsonpCallback::from_query(Some("alert(1);x")).as_ref(), "callback");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonpCallback(String);

impl JsonpCallback {
    /// Resolves the `callback` query parameter.
    ///
    /// Absent or empty values fall back to [`DEFAULT_CALLBACK`]. Unsafe
    /// names also fall back, with a warning, so a script tag still gets a
    /// parseable answer.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::default(),
            Some(name) if Self::is_safe(name) => Self(name.to_string()),
            Some(name) => {
                tracing::warn!(
                    len = name.len(),
                    "rejecting unsafe JSONP callback name, using default"
                );
                Self::default()
            }
        }
    }

    /// Returns `true` if `name` is a dotted path of JavaScript identifiers.
    #[must_use]
    pub fn is_safe(name: &str) -> bool {
        if name.is_empty() || name.len() > MAX_CALLBACK_LEN {
            return false;
        }

        name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
    }

    /// Wraps a pre-rendered JavaScript expression: `name(payload)`.
    #[must_use]
    pub fn wrap_raw(&self, payload: &str) -> JsonpResponse {
        JsonpResponse {
            body: format!("{}({payload})", self.0),
        }
    }

    /// Serializes `value` as JSON and wraps it.
    ///
    /// ```rust
    /// use imweb_proxy::server::JsonpCallback;
    ///
    /// let cb = JsonpCallback::from_query(Some("cb"));
    /// let response = cb.wrap_json(&serde_json::json!({"stock": 1}));
    /// assert_eq!(response.body(), r#"cb({"stock":1})"#);
    /// ```
    #[must_use]
    pub fn wrap_json<T: Serialize + ?Sized>(&self, value: &T) -> JsonpResponse {
        match serde_json::to_string(value) {
            Ok(json) => self.wrap_raw(&json),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize JSONP payload");
                self.wrap_raw("null")
            }
        }
    }
}

impl Default for JsonpCallback {
    fn default() -> Self {
        Self(DEFAULT_CALLBACK.to_string())
    }
}

impl AsRef<str> for JsonpCallback {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A `text/javascript` answer, always sent with status 200.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonpResponse {
    body: String,
}

impl JsonpResponse {
    /// Returns the script body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl IntoResponse for JsonpResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, JAVASCRIPT_CONTENT_TYPE)], self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_safe_names() {
        for name in ["cb", "callback", "_x", "$", "jQuery3710_17000", "a.b.c", "$.fn"] {
            assert!(JsonpCallback::is_safe(name), "{name} should be accepted");
        }
    }

    #[test]
    fn test_unsafe_names() {
        for name in [
            "",
            "1cb",
            "cb()",
            "a..b",
            "a.",
            ".a",
            "alert(document.cookie)//",
            "cb;evil",
            "cb<script>",
            "한글",
            "a b",
        ] {
            assert!(!JsonpCallback::is_safe(name), "{name} should be rejected");
        }
        assert!(!JsonpCallback::is_safe(&"a".repeat(MAX_CALLBACK_LEN + 1)));
    }

    #[test]
    fn test_empty_callback_uses_default() {
        assert_eq!(JsonpCallback::from_query(Some("")).as_ref(), DEFAULT_CALLBACK);
    }

    #[test]
    fn test_wrap_raw_keeps_payload_verbatim() {
        let response =
            JsonpCallback::from_query(Some("cb")).wrap_raw("{ error: 'Missing prodNo or accessToken' }");
        assert_eq!(
            response.body(),
            "cb({ error: 'Missing prodNo or accessToken' })"
        );
    }

    #[test]
    fn test_into_response_is_200_javascript() {
        let response = JsonpCallback::default().wrap_raw("1").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JAVASCRIPT_CONTENT_TYPE
        );
    }
}

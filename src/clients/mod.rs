//! HTTP client layer for the imweb provider.
//!
//! - [`ImwebClient`]: the async client used for every outbound call
//! - [`HttpError`]: transport, status and decoding failures
//! - [`HttpResponseError`]: a non-2xx provider response
//!
//! # Retry Behavior
//!
//! None. A failed call degrades the single request that issued it; the
//! handlers decide how the failure is rendered to the browser.

mod errors;
mod http_client;

pub use errors::{HttpError, HttpResponseError};
pub use http_client::{ImwebClient, SDK_VERSION};

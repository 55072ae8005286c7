//! HTTP client for imweb API communication.
//!
//! This module provides the [`ImwebClient`] type, the only place in the crate
//! that issues outbound requests. It owns the shared `reqwest` connection
//! pool, applies the configured timeout, and maps provider responses onto
//! [`HttpError`].

use serde::Serialize;
use serde_json::Value;

use crate::auth::AccessToken;
use crate::clients::errors::{HttpError, HttpResponseError};
use crate::config::{ProviderEndpoints, ProxyConfig};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the imweb OAuth server and REST API.
///
/// Cloning is cheap: the underlying `reqwest::Client` is reference-counted.
///
/// # Example
///
/// ```rust,ignore
/// use imweb_proxy::{ImwebClient, ProxyConfig};
///
/// let config = ProxyConfig::from_env()?;
/// let client = ImwebClient::new(&config)?;
///
/// let url = client.endpoints().products_url();
/// let body = client.get_json(&url, &token, &[("site_code", "S2024")]).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ImwebClient {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

// Verify ImwebClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ImwebClient>();
};

impl ImwebClient {
    /// Creates a client for the endpoints and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ProxyConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.upstream_timeout())
            .user_agent(format!("imweb-stock-proxy v{SDK_VERSION}"))
            .build()?;

        Ok(Self {
            client,
            endpoints: config.endpoints().clone(),
        })
    }

    /// Returns the provider endpoints this client targets.
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Sends an authenticated GET and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Network`] on transport failure or timeout
    /// - [`HttpError::Response`] on a non-2xx status
    /// - [`HttpError::InvalidBody`] if a 2xx body is not JSON
    pub async fn get_json(
        &self,
        url: &str,
        token: &AccessToken,
        query: &[(&str, &str)],
    ) -> Result<Value, HttpError> {
        tracing::debug!(url, "GET provider resource");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        Self::read_json(response).await
    }

    /// Sends an unauthenticated `application/x-www-form-urlencoded` POST and
    /// decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ImwebClient::get_json`].
    pub async fn post_form<T>(&self, url: &str, form: &T) -> Result<Value, HttpError>
    where
        T: Serialize + ?Sized,
    {
        tracing::debug!(url, "POST provider form");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, HttpError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(HttpError::Response(HttpResponseError {
                code: status.as_u16(),
                body,
            }));
        }

        if body.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }

        serde_json::from_str(&body).map_err(|e| HttpError::InvalidBody {
            message: e.to_string(),
        })
    }
}

//! Provider endpoint contract.
//!
//! imweb splits its surface over two hosts: the OAuth server
//! (`openapi.imweb.me`) and the REST API (`api.imweb.me`). Every path the
//! proxy calls is derived here so that the provider contract lives in one
//! place.

use super::newtypes::BaseUrl;
use crate::error::ConfigError;

/// Default OAuth host.
pub const DEFAULT_OAUTH_BASE: &str = "https://openapi.imweb.me";

/// Default REST API host.
pub const DEFAULT_API_BASE: &str = "https://api.imweb.me";

/// Base URLs of the provider services.
///
/// # Example
///
/// ```rust
/// use imweb_proxy::ProviderEndpoints;
///
/// let endpoints = ProviderEndpoints::default();
/// assert_eq!(endpoints.authorize_url(), "https://openapi.imweb.me/oauth2/authorize");
/// assert_eq!(endpoints.token_url(), "https://openapi.imweb.me/oauth2/token");
/// assert_eq!(
///     endpoints.product_url("123"),
///     "https://api.imweb.me/v2/shop/products/123"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderEndpoints {
    oauth_base: BaseUrl,
    api_base: BaseUrl,
}

impl ProviderEndpoints {
    /// Creates endpoints from explicit base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if either URL is invalid.
    pub fn new(oauth_base: &str, api_base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            oauth_base: BaseUrl::new(oauth_base)?,
            api_base: BaseUrl::new(api_base)?,
        })
    }

    /// Points both services at a single host. Used against mock servers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL is invalid.
    pub fn single_host(base: &str) -> Result<Self, ConfigError> {
        Self::new(base, base)
    }

    /// Returns the OAuth host.
    #[must_use]
    pub const fn oauth_base(&self) -> &BaseUrl {
        &self.oauth_base
    }

    /// Returns the REST API host.
    #[must_use]
    pub const fn api_base(&self) -> &BaseUrl {
        &self.api_base
    }

    /// The browser-facing authorize endpoint.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        self.oauth_base.join("/oauth2/authorize")
    }

    /// The server-to-server token endpoint.
    #[must_use]
    pub fn token_url(&self) -> String {
        self.oauth_base.join("/oauth2/token")
    }

    /// The product listing endpoint.
    #[must_use]
    pub fn products_url(&self) -> String {
        self.api_base.join("/v2/shop/products")
    }

    /// The product detail endpoint for one product number.
    #[must_use]
    pub fn product_url(&self, prod_no: &str) -> String {
        format!("{}/{}", self.products_url(), urlencoding::encode(prod_no))
    }
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            oauth_base: BaseUrl::new(DEFAULT_OAUTH_BASE).expect("default OAuth base is a valid URL"),
            api_base: BaseUrl::new(DEFAULT_API_BASE).expect("default API base is a valid URL"),
        }
    }
}

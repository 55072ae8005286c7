//! Configuration for the proxy.
//!
//! # Overview
//!
//! - [`ProxyConfig`]: all settings, immutable for the life of the process
//! - [`ProxyConfigBuilder`]: programmatic construction
//! - [`ClientId`], [`ClientSecret`], [`SiteCode`], [`RedirectUri`]: credentials
//! - [`ProviderEndpoints`]: where the provider lives
//!
//! # Environment
//!
//! [`ProxyConfig::from_env`] reads `CLIENT_ID`, `CLIENT_SECRET`, `SITE_CODE`,
//! `REDIRECT_URI`, `PORT`, `OAUTH_SCOPE`, `IMWEB_OAUTH_BASE_URL`,
//! `IMWEB_API_BASE_URL` and `UPSTREAM_TIMEOUT_SECS`. Missing credentials
//! are logged and carried through as empty strings.
//!
//! # Example
//!
//! ```rust
//! use imweb_proxy::{ClientId, ClientSecret, ProxyConfig, SiteCode};
//!
//! let config = ProxyConfig::builder()
//!     .client_id(ClientId::new("my-client"))
//!     .client_secret(ClientSecret::new("my-secret"))
//!     .site_code(SiteCode::new("S2024"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.port(), 3000);
//! ```

mod endpoints;
mod newtypes;

pub use endpoints::{ProviderEndpoints, DEFAULT_API_BASE, DEFAULT_OAUTH_BASE};
pub use newtypes::{BaseUrl, ClientId, ClientSecret, RedirectUri, SiteCode};

use std::time::Duration;

use crate::auth::scopes::DEFAULT_SCOPES;
use crate::auth::AuthScopes;
use crate::error::ConfigError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Outbound request timeout used when `UPSTREAM_TIMEOUT_SECS` is unset.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the proxy.
///
/// `ProxyConfig` is `Clone`, `Send`, and `Sync`; the server shares one
/// instance behind an `Arc`.
#[derive(Clone, Debug)]
pub struct ProxyConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    site_code: SiteCode,
    redirect_uri: RedirectUri,
    port: u16,
    scopes: AuthScopes,
    endpoints: ProviderEndpoints,
    upstream_timeout: Duration,
}

impl ProxyConfig {
    /// Creates a new builder for constructing a `ProxyConfig`.
    #[must_use]
    pub fn builder() -> ProxyConfigBuilder {
        ProxyConfigBuilder::new()
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `PORT`, `OAUTH_SCOPE`, either endpoint
    /// override or `UPSTREAM_TIMEOUT_SECS` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    ///
    /// # Errors
    ///
    /// See [`ProxyConfig::from_env`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use imweb_proxy::ProxyConfig;
    ///
    /// let vars = HashMap::from([("CLIENT_ID", "abc"), ("PORT", "8080")]);
    /// let config = ProxyConfig::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
    ///
    /// assert_eq!(config.client_id().as_ref(), "abc");
    /// assert_eq!(config.port(), 8080);
    /// assert!(config.site_code().is_empty());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credential = |key: &'static str| {
            var(key).unwrap_or_else(|| {
                tracing::warn!(variable = key, "environment variable not set, using empty value");
                String::new()
            })
        };

        let mut builder = Self::builder()
            .client_id(ClientId::new(credential("CLIENT_ID")))
            .client_secret(ClientSecret::new(credential("CLIENT_SECRET")))
            .site_code(SiteCode::new(credential("SITE_CODE")))
            .redirect_uri(RedirectUri::new(credential("REDIRECT_URI")));

        if let Some(port) = var("PORT") {
            let port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value: port })?;
            builder = builder.port(port);
        }

        if let Some(scope) = var("OAUTH_SCOPE") {
            builder = builder.scopes(scope.parse()?);
        }

        let oauth_base = var("IMWEB_OAUTH_BASE_URL");
        let api_base = var("IMWEB_API_BASE_URL");
        if oauth_base.is_some() || api_base.is_some() {
            builder = builder.endpoints(ProviderEndpoints::new(
                oauth_base.as_deref().unwrap_or(DEFAULT_OAUTH_BASE),
                api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            )?);
        }

        if let Some(timeout) = var("UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout { value: timeout })?;
            builder = builder.upstream_timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Returns the OAuth client identifier.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the OAuth client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the imweb site code.
    #[must_use]
    pub const fn site_code(&self) -> &SiteCode {
        &self.site_code
    }

    /// Returns the registered redirect URI.
    #[must_use]
    pub const fn redirect_uri(&self) -> &RedirectUri {
        &self.redirect_uri
    }

    /// Returns the listen port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the requested OAuth scopes.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the provider endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Returns the timeout applied to every outbound provider request.
    #[must_use]
    pub const fn upstream_timeout(&self) -> Duration {
        self.upstream_timeout
    }
}

// Verify ProxyConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProxyConfig>();
};

/// Builder for constructing [`ProxyConfig`] instances.
///
/// # Defaults
///
/// - credentials: empty
/// - `port`: 3000
/// - `scopes`: `site-info:write product:read`
/// - `endpoints`: the production imweb hosts
/// - `upstream_timeout`: 30 seconds
#[derive(Debug, Default)]
pub struct ProxyConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    site_code: Option<SiteCode>,
    redirect_uri: Option<RedirectUri>,
    port: Option<u16>,
    scopes: Option<AuthScopes>,
    endpoints: Option<ProviderEndpoints>,
    upstream_timeout: Option<Duration>,
}

impl ProxyConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OAuth client identifier.
    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Sets the OAuth client secret.
    #[must_use]
    pub fn client_secret(mut self, client_secret: ClientSecret) -> Self {
        self.client_secret = Some(client_secret);
        self
    }

    /// Sets the imweb site code.
    #[must_use]
    pub fn site_code(mut self, site_code: SiteCode) -> Self {
        self.site_code = Some(site_code);
        self
    }

    /// Sets the registered redirect URI.
    #[must_use]
    pub fn redirect_uri(mut self, redirect_uri: RedirectUri) -> Self {
        self.redirect_uri = Some(redirect_uri);
        self
    }

    /// Sets the listen port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the OAuth scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the provider endpoints.
    #[must_use]
    pub fn endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Sets the outbound request timeout.
    #[must_use]
    pub const fn upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = Some(timeout);
        self
    }

    /// Builds the [`ProxyConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout is zero, and
    /// [`ConfigError::InvalidScopes`] if the default scope set fails to parse.
    pub fn build(self) -> Result<ProxyConfig, ConfigError> {
        let scopes = match self.scopes {
            Some(scopes) => scopes,
            None => DEFAULT_SCOPES.parse()?,
        };

        let upstream_timeout = self.upstream_timeout.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT);
        if upstream_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                value: "0".to_string(),
            });
        }

        Ok(ProxyConfig {
            client_id: self.client_id.unwrap_or_default(),
            client_secret: self.client_secret.unwrap_or_default(),
            site_code: self.site_code.unwrap_or_default(),
            redirect_uri: self.redirect_uri.unwrap_or_default(),
            port: self.port.unwrap_or(DEFAULT_PORT),
            scopes,
            endpoints: self.endpoints.unwrap_or_default(),
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| vars.get(key).map(ToString::to_string)
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ProxyConfig::builder().build().unwrap();

        assert_eq!(config.port(), DEFAULT_PORT);
        assert_eq!(config.scopes().to_string(), DEFAULT_SCOPES);
        assert_eq!(config.endpoints(), &ProviderEndpoints::default());
        assert_eq!(config.upstream_timeout(), DEFAULT_UPSTREAM_TIMEOUT);
        assert!(config.client_id().is_empty());
        assert!(config.client_secret().is_empty());
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ProxyConfig::builder()
            .upstream_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ProxyConfig::from_lookup(lookup_from(&[
            ("CLIENT_ID", "client-123"),
            ("CLIENT_SECRET", "secret-456"),
            ("SITE_CODE", "S20240101"),
            ("REDIRECT_URI", "http://localhost:4000/oauth/callback"),
            ("PORT", "4000"),
            ("OAUTH_SCOPE", "site-info:write product:read product:write"),
            ("IMWEB_API_BASE_URL", "http://127.0.0.1:9000"),
            ("UPSTREAM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.client_id().as_ref(), "client-123");
        assert_eq!(config.client_secret().as_ref(), "secret-456");
        assert_eq!(config.site_code().as_ref(), "S20240101");
        assert_eq!(
            config.redirect_uri().as_ref(),
            "http://localhost:4000/oauth/callback"
        );
        assert_eq!(config.port(), 4000);
        assert_eq!(
            config.scopes().to_string(),
            "site-info:write product:read product:write"
        );
        assert_eq!(
            config.endpoints().oauth_base().as_ref(),
            DEFAULT_OAUTH_BASE
        );
        assert_eq!(
            config.endpoints().api_base().as_ref(),
            "http://127.0.0.1:9000"
        );
        assert_eq!(config.upstream_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_tolerates_missing_credentials() {
        let config = ProxyConfig::from_lookup(lookup_from(&[("SITE_CODE", "")])).unwrap();

        assert!(config.client_id().is_empty());
        assert!(config.site_code().is_empty());
        assert!(config.redirect_uri().is_empty());
        assert_eq!(config.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_from_lookup_rejects_bad_port() {
        let result = ProxyConfig::from_lookup(lookup_from(&[("PORT", "http")]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::InvalidPort {
                value: "http".to_string()
            }
        );
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let result = ProxyConfig::from_lookup(lookup_from(&[("UPSTREAM_TIMEOUT_SECS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_debug_output_masks_secret() {
        let config = ProxyConfig::builder()
            .client_secret(ClientSecret::new("do-not-print"))
            .build()
            .unwrap();

        let debug_str = format!("{config:?}");
        assert!(debug_str.contains("ProxyConfig"));
        assert!(!debug_str.contains("do-not-print"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProxyConfig>();
    }
}

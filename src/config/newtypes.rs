//! Newtype wrappers for configuration values.
//!
//! Credential values are not validated: the provider is the authority on
//! whether a client id or site code is acceptable, and an empty value is
//! forwarded untouched. [`BaseUrl`] is the exception because a malformed
//! endpoint would make every outbound request fail.

use crate::error::ConfigError;
use std::fmt;

macro_rules! credential_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Wraps the given value without validation.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns `true` if no value was configured.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

credential_newtype!(
    /// The OAuth client identifier issued by imweb.
    ///
    /// ```rust
    /// use imweb_proxy::ClientId;
    ///
    /// let id = ClientId::new("my-client");
    /// assert_eq!(id.as_ref(), "my-client");
    /// ```
    ClientId
);

credential_newtype!(
    /// The imweb site code that scopes every API call to one storefront.
    SiteCode
);

credential_newtype!(
    /// The redirect URI registered with the provider for the OAuth callback.
    RedirectUri
);

/// The OAuth client secret.
///
/// The `Debug` implementation masks the value so the secret never reaches
/// log output.
///
/// ```rust
/// use imweb_proxy::ClientSecret;
///
/// let secret = ClientSecret::new("hunter2");
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wraps the given secret without validation.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` if no secret was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated absolute http(s) base URL for a provider host.
///
/// Trailing slashes are stripped so paths can be appended with `format!`.
///
/// ```rust
/// use imweb_proxy::BaseUrl;
///
/// let url = BaseUrl::new("https://api.imweb.me/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.imweb.me");
/// assert_eq!(url.host_name(), "api.imweb.me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidEndpointUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidEndpointUrl { url });
        }

        Ok(Self {
            url,
            host_start,
            host_end,
        })
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins an absolute path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

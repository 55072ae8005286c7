//! OAuth authorization URL generation.
//!
//! The authorize endpoint takes camelCase query keys
//! (`responseType`, `clientId`, `redirectUri`, `scope`, `siteCode`). Every
//! value is percent-encoded, including the redirect URI and the
//! space-separated scope list, so the URL is unambiguous whatever the
//! configured values contain.
//!
//! # Example
//!
//! ```rust
//! use imweb_proxy::{ClientId, ProxyConfig, RedirectUri, SiteCode};
//! use imweb_proxy::auth::oauth::authorization_url;
//!
//! let config = ProxyConfig::builder()
//!     .client_id(ClientId::new("my-client"))
//!     .site_code(SiteCode::new("S2024"))
//!     .redirect_uri(RedirectUri::new("http://localhost:3000/oauth/callback"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     authorization_url(&config),
//!     "https://openapi.imweb.me/oauth2/authorize?responseType=code&clientId=my-client\
//!      &redirectUri=http%3A%2F%2Flocalhost%3A3000%2Foauth%2Fcallback\
//!      &scope=site-info%3Awrite%20product%3Aread&siteCode=S2024"
//! );
//! ```

use crate::auth::AuthScopes;
use crate::config::ProxyConfig;

/// Link text rendered on the index page.
pub const AUTHORIZE_LINK_TEXT: &str = "아임웹 인증하기";

/// Result of initiating OAuth authorization.
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The full authorization URL to send the browser to.
    pub auth_url: String,
}

impl BeginAuthResult {
    /// Renders the URL as the HTML anchor served on the index route.
    ///
    /// The URL is inserted verbatim; it only ever contains percent-encoded
    /// values and `&` separators.
    #[must_use]
    pub fn to_html_anchor(&self) -> String {
        format!(r#"<a href="{}">{AUTHORIZE_LINK_TEXT}</a>"#, self.auth_url)
    }
}

/// Builds the authorization URL for the configured client and site.
#[must_use]
pub fn authorization_url(config: &ProxyConfig) -> String {
    build_url(config, config.scopes())
}

/// Initiates the authorization code flow.
///
/// `scope_override` replaces the configured scopes for this one URL.
#[must_use]
pub fn begin_auth(config: &ProxyConfig, scope_override: Option<&AuthScopes>) -> BeginAuthResult {
    let scopes = scope_override.unwrap_or_else(|| config.scopes());
    BeginAuthResult {
        auth_url: build_url(config, scopes),
    }
}

fn build_url(config: &ProxyConfig, scopes: &AuthScopes) -> String {
    let params = [
        ("responseType", "code".to_string()),
        ("clientId", config.client_id().as_ref().to_string()),
        ("redirectUri", config.redirect_uri().as_ref().to_string()),
        ("scope", scopes.to_string()),
        ("siteCode", config.site_code().as_ref().to_string()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.endpoints().authorize_url(), query_string)
}

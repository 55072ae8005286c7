//! # imweb stock proxy
//!
//! A small backend that completes the imweb OAuth2 authorization-code flow,
//! keeps the resulting access token in memory, and proxies product and stock
//! lookups to a storefront script via JSONP.
//!
//! ## Overview
//!
//! - Configuration from the environment via [`ProxyConfig`]
//! - Authorization URL construction and code exchange via [`auth::oauth`]
//! - A single-slot token cache, [`TokenStore`]
//! - A provider client, [`ImwebClient`], and product calls in [`products`]
//! - An axum router with JSONP shaping in [`server`]
//!
//! ## Quick Start
//!
//! ```rust
//! use imweb_proxy::{ClientId, ProxyConfig, SiteCode};
//! use imweb_proxy::auth::oauth::authorization_url;
//!
//! let config = ProxyConfig::builder()
//!     .client_id(ClientId::new("my-client"))
//!     .site_code(SiteCode::new("S2024"))
//!     .build()
//!     .unwrap();
//!
//! let url = authorization_url(&config);
//! assert!(url.contains("clientId=my-client"));
//! ```
//!
//! ## Running the Server
//!
//! ```rust,ignore
//! use imweb_proxy::{server, ProxyConfig};
//!
//! let config = ProxyConfig::from_env()?;
//! server::serve(config).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No ambient state**: the token store is owned by the server state and
//!   passed to handlers explicitly
//! - **One provider adapter**: URLs, parameter casing and auth headers live in
//!   [`config::ProviderEndpoints`] and [`ImwebClient`]
//! - **Soft failures**: browser-facing routes answer every failure with a
//!   readable message instead of an HTTP error

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod products;
pub mod server;

pub use auth::{AccessToken, AuthScopes, TokenSnapshot, TokenStore};
pub use clients::{HttpError, HttpResponseError, ImwebClient};
pub use config::{
    BaseUrl, ClientId, ClientSecret, ProviderEndpoints, ProxyConfig, ProxyConfigBuilder,
    RedirectUri, SiteCode,
};
pub use error::ConfigError;
pub use products::StockResult;

pub use auth::oauth::{
    authorization_url, begin_auth, complete_auth_callback, exchange_authorization_code,
    BeginAuthResult, OAuthError,
};

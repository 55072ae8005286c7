//! OAuth 2.0 authorization code flow against imweb.
//!
//! 1. **Authorization** ([`begin_auth`], [`authorization_url`]): build the
//!    provider URL the browser is sent to.
//! 2. **Callback** ([`complete_auth_callback`]): exchange the returned code
//!    for an access token and cache it in the [`TokenStore`](crate::TokenStore).
//!
//! Tokens are never refreshed; running the flow again replaces the cached
//! token.
//!
//! # Example
//!
//! ```rust,ignore
//! use imweb_proxy::{ImwebClient, ProxyConfig, TokenStore};
//! use imweb_proxy::auth::oauth::{begin_auth, complete_auth_callback};
//!
//! let config = ProxyConfig::from_env()?;
//! let client = ImwebClient::new(&config)?;
//! let store = TokenStore::new();
//!
//! // Step 1: send the browser to the provider
//! let result = begin_auth(&config, None);
//! println!("{}", result.auth_url);
//!
//! // Step 2: in the callback handler
//! let version = complete_auth_callback(&client, &config, &store, Some(code)).await?;
//! ```

mod begin_auth;
mod error;
mod exchange_code;

pub use begin_auth::{authorization_url, begin_auth, BeginAuthResult, AUTHORIZE_LINK_TEXT};
pub use error::OAuthError;
pub use exchange_code::{complete_auth_callback, exchange_authorization_code};

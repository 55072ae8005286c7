//! Authentication types.
//!
//! - [`AuthScopes`]: the OAuth scopes requested from imweb
//! - [`AccessToken`]: a bearer credential with masked debug output
//! - [`TokenStore`]: the process-wide single-slot token cache
//! - [`oauth`]: authorization URL construction and code exchange
//!
//! # Example
//!
//! ```rust
//! use imweb_proxy::{AccessToken, AuthScopes};
//!
//! let scopes: AuthScopes = "site-info:write product:read".parse().unwrap();
//! assert_eq!(scopes.iter().count(), 2);
//!
//! let token = AccessToken::new("abc");
//! assert_eq!(token.bearer(), "Bearer abc");
//! ```

pub mod oauth;
pub(crate) mod scopes;
pub mod token_store;

pub use scopes::{AuthScopes, DEFAULT_SCOPES};
pub use token_store::{AccessToken, TokenSnapshot, TokenStore};

//! Process-wide access token cache.
//!
//! The proxy serves a single imweb site, so there is exactly one token slot.
//! It starts empty, is overwritten wholesale by every successful code
//! exchange, and is never expired or cleared. Each write bumps a monotonic
//! version so callers (and tests) can tell whether a store happened.

use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::RwLock;

/// A bearer credential issued by the provider.
///
/// The `Debug` implementation masks the value; use [`AccessToken::as_ref`]
/// when the raw token is genuinely needed.
///
/// ```rust
/// use imweb_proxy::AccessToken;
///
/// let token = AccessToken::new("abc123");
/// assert_eq!(token.as_ref(), "abc123");
/// assert_eq!(format!("{:?}", token), "AccessToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the value formatted for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

/// A point-in-time copy of the store contents.
#[derive(Clone, Debug, Default)]
pub struct TokenSnapshot {
    /// The cached token, if an exchange has succeeded.
    pub token: Option<AccessToken>,
    /// Number of successful stores since start-up.
    pub version: u64,
    /// When the token was last stored.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Single-slot, single-writer token cache.
///
/// Readers see either the previous or the latest token, never a partial
/// write. An empty string is never stored: [`TokenStore::store`] ignores it
/// so the "no token" state stays unambiguous.
///
/// # Example
///
/// ```rust
/// use imweb_proxy::{AccessToken, TokenStore};
///
/// # block_on(async {
/// let store = TokenStore::new();
/// assert!(store.current().await.is_none());
///
/// let version = store.store(AccessToken::new("t1")).await;
/// assert_eq!(version, 1);
/// assert_eq!(store.current().await.unwrap().as_ref(), "t1");
/// # });
/// # fn block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TokenStore {
    inner: RwLock<TokenSnapshot>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, if any.
    pub async fn current(&self) -> Option<AccessToken> {
        self.inner.read().await.token.clone()
    }

    /// Returns a copy of the full store state.
    pub async fn snapshot(&self) -> TokenSnapshot {
        self.inner.read().await.clone()
    }

    /// Returns the number of successful stores so far.
    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }

    /// Replaces the cached token and returns the new version.
    ///
    /// Empty tokens are rejected and leave the store untouched; the current
    /// version is returned in that case.
    pub async fn store(&self, token: AccessToken) -> u64 {
        let mut state = self.inner.write().await;
        if token.as_ref().is_empty() {
            tracing::warn!(version = state.version, "refusing to cache an empty access token");
            return state.version;
        }

        state.token = Some(token);
        state.version += 1;
        state.updated_at = Some(Utc::now());
        tracing::info!(version = state.version, "access token cached");
        state.version
    }
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = TokenStore::new();
        let snapshot = store.snapshot().await;

        assert!(snapshot.token.is_none());
        assert_eq!(snapshot.version, 0);
        assert!(snapshot.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_store_overwrites_and_bumps_version() {
        let store = TokenStore::new();

        assert_eq!(store.store(AccessToken::new("first")).await, 1);
        assert_eq!(store.store(AccessToken::new("second")).await, 2);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.token.unwrap().as_ref(), "second");
        assert_eq!(snapshot.version, 2);
        assert!(snapshot.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_token_is_not_stored() {
        let store = TokenStore::new();
        store.store(AccessToken::new("kept")).await;

        let version = store.store(AccessToken::new("")).await;

        assert_eq!(version, 1);
        assert_eq!(store.current().await.unwrap().as_ref(), "kept");
    }

    #[tokio::test]
    async fn test_concurrent_readers_see_whole_tokens() {
        let store = Arc::new(TokenStore::new());
        let writer = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..50 {
                    store.store(AccessToken::new(format!("token-{i}"))).await;
                }
            })
        };

        for _ in 0..50 {
            if let Some(token) = store.current().await {
                assert!(token.as_ref().starts_with("token-"));
            }
        }

        writer.await.unwrap();
        assert_eq!(store.version().await, 50);
        assert_eq!(store.current().await.unwrap().as_ref(), "token-49");
    }

    #[test]
    fn test_bearer_header_value() {
        assert_eq!(AccessToken::new("xyz").bearer(), "Bearer xyz");
    }

    #[test]
    fn test_access_token_debug_is_masked() {
        let token = AccessToken::new("very-secret");
        assert!(!format!("{token:?}").contains("very-secret"));
    }
}

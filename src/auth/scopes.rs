//! OAuth scope handling for the imweb API.
//!
//! imweb scopes take the form `resource:action` (for example
//! `product:read`) and are sent space-separated in the authorize URL.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scopes requested when none are configured.
///
/// `site-info:write` is mandatory for imweb apps; without it the provider
/// refuses the authorization request.
pub const DEFAULT_SCOPES: &str = "site-info:write product:read";

/// An ordered set of OAuth scopes.
///
/// Insertion order is preserved and duplicates are dropped, so the scope
/// string in the authorize URL is exactly what was configured.
///
/// # Example
///
/// ```rust
/// use imweb_proxy::AuthScopes;
///
/// let scopes: AuthScopes = "site-info:write product:read product:read".parse().unwrap();
/// assert_eq!(scopes.to_string(), "site-info:write product:read");
///
/// let required: AuthScopes = "product:read".parse().unwrap();
/// assert!(scopes.covers(&required));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: Vec<String>,
}

impl AuthScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if this scope set contains every scope in `other`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        other.scopes.iter().all(|s| self.scopes.contains(s))
    }

    /// Returns an iterator over the scopes in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn is_valid_scope(scope: &str) -> bool {
        let Some((resource, action)) = scope.split_once(':') else {
            return false;
        };

        !resource.is_empty()
            && !action.is_empty()
            && resource
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
            && action.chars().all(|c| c.is_ascii_lowercase())
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes: Vec<String> = Vec::new();

        for scope in s.split([' ', ',']) {
            let scope = scope.trim();
            if scope.is_empty() {
                continue;
            }

            if !Self::is_valid_scope(scope) {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("'{scope}' is not of the form 'resource:action'"),
                });
            }

            if !scopes.iter().any(|existing| existing == scope) {
                scopes.push(scope.to_string());
            }
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scopes.join(" "))
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

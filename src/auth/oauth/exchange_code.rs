//! Authorization code exchange.
//!
//! After consent the provider redirects the browser to the callback route
//! with a one-time `code`. [`exchange_authorization_code`] trades it for an
//! access token with a form-encoded POST to the token endpoint, and
//! [`complete_auth_callback`] additionally writes the token to the shared
//! [`TokenStore`].
//!
//! The token endpoint takes snake_case form fields:
//! `grant_type=authorization_code`, `code`, `client_id`, `client_secret`,
//! `redirect_uri`.

use serde::{Deserialize, Serialize};

use crate::auth::oauth::error::OAuthError;
use crate::auth::{AccessToken, TokenStore};
use crate::clients::ImwebClient;
use crate::config::ProxyConfig;

/// Grant type for the authorization code flow.
const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";

/// Form body for the token request.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
}

/// Token endpoint response.
///
/// The provider has answered both with a flat OAuth body and with its v2
/// envelope (`{"statusCode": 200, "data": {"accessToken": ...}}`); both are
/// accepted.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    data: Option<TokenResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponseData {
    #[serde(default, alias = "access_token")]
    access_token: Option<String>,
}

impl TokenResponse {
    fn into_token(self) -> Option<AccessToken> {
        self.access_token
            .or_else(|| self.data.and_then(|data| data.access_token))
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
    }
}

/// Exchanges an authorization code for an access token.
///
/// A missing or empty `code` fails with
/// [`OAuthError::MissingAuthorizationCode`] before any network traffic.
///
/// # Errors
///
/// - [`OAuthError::MissingAuthorizationCode`]: no code was supplied
/// - [`OAuthError::HttpError`]: transport failure or non-2xx status
/// - [`OAuthError::TokenExchangeFailed`]: 2xx response without a usable token
pub async fn exchange_authorization_code(
    client: &ImwebClient,
    config: &ProxyConfig,
    code: Option<&str>,
) -> Result<AccessToken, OAuthError> {
    let code = code
        .filter(|code| !code.is_empty())
        .ok_or(OAuthError::MissingAuthorizationCode)?;

    let request = TokenRequest {
        grant_type: AUTHORIZATION_CODE_GRANT_TYPE,
        code,
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        redirect_uri: config.redirect_uri().as_ref(),
    };

    let body = client
        .post_form(&client.endpoints().token_url(), &request)
        .await?;

    let response: TokenResponse =
        serde_json::from_value(body).map_err(|e| OAuthError::TokenExchangeFailed {
            status: 200,
            message: format!("Failed to parse token response: {e}"),
        })?;

    response
        .into_token()
        .ok_or_else(|| OAuthError::TokenExchangeFailed {
            status: 200,
            message: "response did not contain an access token".to_string(),
        })
}

/// Exchanges the callback code and caches the resulting token.
///
/// Returns the new store version. On any error the store is left untouched.
///
/// # Errors
///
/// See [`exchange_authorization_code`].
pub async fn complete_auth_callback(
    client: &ImwebClient,
    config: &ProxyConfig,
    store: &TokenStore,
    code: Option<&str>,
) -> Result<u64, OAuthError> {
    let token = exchange_authorization_code(client, config, code).await?;
    Ok(store.store(token).await)
}

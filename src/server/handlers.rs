//! Route handlers.
//!
//! Each handler reads the token store independently; there is no state
//! beyond "token present / token absent". Failures never escape as HTTP
//! errors except on `/products`, which is a JSON API.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::jsonp::{JsonpCallback, JsonpResponse};
use super::AppState;
use crate::auth::oauth::{begin_auth, complete_auth_callback, OAuthError};
use crate::products::{fetch_stock, list_products};

/// Callback page: no `code` parameter.
pub const MISSING_CODE_MESSAGE: &str = "❌ 인가 코드 없음";

/// Callback page: token cached.
pub const TOKEN_SAVED_MESSAGE: &str = "✅ Access Token 저장 완료";

/// Callback page prefix for a failed exchange.
pub const TOKEN_FAILED_PREFIX: &str = "❌ 토큰 발급 실패: ";

/// JSONP payload when `prodNo` or the token is missing.
pub const MISSING_INPUT_PAYLOAD: &str = "{ error: 'Missing prodNo or accessToken' }";

/// JSONP payload when the provider call fails.
pub const STOCK_FAILED_PAYLOAD: &str = "{ error: '재고 불러오기 실패' }";

/// `/products` error when no token is cached.
pub const MISSING_TOKEN_ERROR: &str = "Missing accessToken";

/// `/products` error when the provider call fails.
pub const PRODUCTS_FAILED_ERROR: &str = "Failed to fetch products";

/// `GET /`: link to the provider's consent page.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(begin_auth(state.config(), None).to_html_anchor())
}

/// `GET /oauth/callback?code=`: exchange the code and cache the token.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> String {
    let code = params.get("code").map(String::as_str);
    tracing::info!(has_code = code.is_some_and(|c| !c.is_empty()), "OAuth callback received");

    match complete_auth_callback(state.client(), state.config(), state.tokens(), code).await {
        Ok(version) => {
            tracing::info!(version, "token exchange succeeded");
            TOKEN_SAVED_MESSAGE.to_string()
        }
        Err(OAuthError::MissingAuthorizationCode) => MISSING_CODE_MESSAGE.to_string(),
        Err(e) => {
            tracing::error!(error = %e, "token exchange failed");
            format!("{TOKEN_FAILED_PREFIX}{}", e.detail())
        }
    }
}

/// `GET /stock?prodNo=&callback=`: JSONP stock lookup.
pub async fn stock(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> JsonpResponse {
    let callback = JsonpCallback::from_query(params.get("callback").map(String::as_str));
    let prod_no = params.get("prodNo").filter(|p| !p.is_empty());
    let token = state.tokens().current().await;

    let (Some(prod_no), Some(token)) = (prod_no, token) else {
        return callback.wrap_raw(MISSING_INPUT_PAYLOAD);
    };

    match fetch_stock(state.client(), state.config(), &token, prod_no).await {
        Ok(result) => callback.wrap_json(&result),
        Err(e) => {
            tracing::error!(prod_no = %prod_no, error = %e, "stock lookup failed");
            callback.wrap_raw(STOCK_FAILED_PAYLOAD)
        }
    }
}

/// `GET /products`: relay the provider's product listing as JSON.
pub async fn products(State(state): State<AppState>) -> Response {
    let Some(token) = state.tokens().current().await else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": MISSING_TOKEN_ERROR })),
        )
            .into_response();
    };

    match list_products(state.client(), state.config(), &token).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "product listing failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": PRODUCTS_FAILED_ERROR })),
            )
                .into_response()
        }
    }
}

/// `GET /token`: plain-text dump of the cached token.
pub async fn token(State(state): State<AppState>) -> String {
    state
        .tokens()
        .current()
        .await
        .map(|token| token.as_ref().to_string())
        .unwrap_or_default()
}

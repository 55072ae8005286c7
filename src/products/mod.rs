//! Product resources on the imweb REST API.
//!
//! Both calls are scoped to the configured site through the `site_code`
//! query parameter and authenticated with the cached bearer token.
//!
//! - [`fetch_product`]: `GET /v2/shop/products/{prodNo}`
//! - [`fetch_stock`]: the same call reduced to a [`StockResult`]
//! - [`list_products`]: `GET /v2/shop/products`

use serde::Serialize;
use serde_json::Value;

use crate::auth::AccessToken;
use crate::clients::{HttpError, ImwebClient};
use crate::config::ProxyConfig;

/// Stock figures for one product.
///
/// Serializes as `{"stock":N,"total":M}`, the shape the storefront script
/// expects.
///
/// ```rust
/// use imweb_proxy::StockResult;
///
/// let body = serde_json::json!({"data": {"stockCount": 5, "totalCount": 20}});
/// let stock = StockResult::from_product_response(&body);
/// assert_eq!(serde_json::to_string(&stock).unwrap(), r#"{"stock":5,"total":20}"#);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StockResult {
    /// Units currently in stock (`data.stockCount`).
    pub stock: i64,
    /// Total units (`data.totalCount`).
    pub total: i64,
}

impl StockResult {
    /// Extracts stock figures from a product-detail response.
    ///
    /// Each field defaults to 0 when it is absent, null or not an integer.
    #[must_use]
    pub fn from_product_response(body: &Value) -> Self {
        let count = |field: &str| {
            body.get("data")
                .and_then(|data| data.get(field))
                .and_then(Value::as_i64)
                .unwrap_or(0)
        };

        Self {
            stock: count("stockCount"),
            total: count("totalCount"),
        }
    }
}

/// Fetches the raw product-detail payload for `prod_no`.
///
/// # Errors
///
/// Returns [`HttpError`] on transport failure, non-2xx status or a
/// non-JSON body.
pub async fn fetch_product(
    client: &ImwebClient,
    config: &ProxyConfig,
    token: &AccessToken,
    prod_no: &str,
) -> Result<Value, HttpError> {
    let url = client.endpoints().product_url(prod_no);
    client
        .get_json(&url, token, &[("site_code", config.site_code().as_ref())])
        .await
}

/// Fetches stock figures for `prod_no`.
///
/// # Errors
///
/// See [`fetch_product`].
pub async fn fetch_stock(
    client: &ImwebClient,
    config: &ProxyConfig,
    token: &AccessToken,
    prod_no: &str,
) -> Result<StockResult, HttpError> {
    let body = fetch_product(client, config, token, prod_no).await?;
    Ok(StockResult::from_product_response(&body))
}

/// Fetches the product listing for the configured site, verbatim.
///
/// # Errors
///
/// See [`fetch_product`].
pub async fn list_products(
    client: &ImwebClient,
    config: &ProxyConfig,
    token: &AccessToken,
) -> Result<Value, HttpError> {
    let url = client.endpoints().products_url();
    client
        .get_json(&url, token, &[("site_code", config.site_code().as_ref())])
        .await
}

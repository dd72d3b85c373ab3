//! Shopping-search API response types.
//!
//! ## Observed shape
//!
//! ### `price` / `price_value`
//! `price` is the display string (`"Rp1.800.000"`, `"$12.99"`). The numeric
//! form arrives as `price_value` on some engines and `extracted_price` on
//! others, and some items carry both. [`ShoppingResult::numeric_price`]
//! prefers `price_value`.
//!
//! ### `merchant`
//! Usually an object with a `name` key, occasionally a bare string, and
//! absent on most `google_shopping` results (which carry `source` instead).
//!
//! ### `link`
//! Direct merchant link. `google_shopping` items usually also carry
//! `product_link` (a Google product page); some carry only that one.
//! [`ShoppingResult::listing_link`] prefers `link`.

use serde::Deserialize;

/// Top-level search response. Every field is optional: a failed call carries
/// only `error`, and a call with no matches omits `shopping_results`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub error: Option<String>,
    /// Kept as raw values so one malformed item cannot fail the whole page.
    #[serde(default)]
    pub shopping_results: Option<Vec<serde_json::Value>>,
}

/// One entry of `shopping_results`.
#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub title: Option<String>,

    /// Display price string, e.g. `"Rp1.800.000"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub price_value: Option<f64>,

    #[serde(default)]
    pub extracted_price: Option<f64>,

    #[serde(default)]
    pub merchant: Option<serde_json::Value>,

    /// Storefront display name, e.g. `"Tokopedia"`.
    #[serde(default)]
    pub source: Option<String>,

    /// Direct merchant link.
    #[serde(default)]
    pub link: Option<String>,

    /// Google product page.
    #[serde(default)]
    pub product_link: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl ShoppingResult {
    /// `link`, falling back to `product_link`.
    #[must_use]
    pub fn listing_link(&self) -> Option<&str> {
        self.link.as_deref().or(self.product_link.as_deref())
    }

    /// `price_value`, falling back to `extracted_price`.
    #[must_use]
    pub fn numeric_price(&self) -> Option<f64> {
        self.price_value.or(self.extracted_price)
    }

    /// Merchant display name from either `{"merchant": {"name": ..}}` or
    /// `{"merchant": ".."}`.
    #[must_use]
    pub fn merchant_name(&self) -> Option<&str> {
        let name = match self.merchant.as_ref()? {
            serde_json::Value::String(name) => Some(name.as_str()),
            serde_json::Value::Object(map) => map.get("name").and_then(serde_json::Value::as_str),
            _ => None,
        };
        name.filter(|name| !name.trim().is_empty())
    }

    /// Returns `true` when the link or the storefront name contains any of
    /// `needles` (case-insensitive).
    #[must_use]
    pub fn mentions_any(&self, needles: &[String]) -> bool {
        let link = self.listing_link().unwrap_or_default().to_lowercase();
        let source = self.source.as_deref().unwrap_or_default().to_lowercase();
        needles.iter().any(|needle| {
            let needle = needle.to_lowercase();
            link.contains(&needle) || source.contains(&needle)
        })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Substituted for a listing name that could not be extracted.
pub const NAME_SENTINEL: &str = "N/A";
/// Substituted for a seller that could not be extracted.
pub const SELLER_SENTINEL: &str = "N/A";
/// Substituted for a listing link that is missing or not absolute.
pub const URL_SENTINEL: &str = "#";
/// Substituted for a missing or unusable listing image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/150x150";

/// A marketplace listing after normalization.
///
/// Every field is populated: anything the source markup omitted has already
/// been replaced by its sentinel (`"N/A"`, `"#"`, `0`, or the placeholder
/// image). Serialized with camelCase keys and `timestamp` as Unix epoch
/// milliseconds, which is the shape the search UI consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Name of the site adapter that produced this listing, e.g. `"Tokopedia"`.
    pub source: String,
    pub name: String,
    /// Whole Rupiah. `0` when the price text could not be parsed.
    pub price: u64,
    pub seller: String,
    /// Absolute listing URL or [`URL_SENTINEL`].
    pub url: String,
    /// Absolute image URL or [`PLACEHOLDER_IMAGE_URL`].
    pub image_url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Formats a whole-Rupiah amount the way Indonesian marketplaces display it,
/// e.g. `1800000` → `"Rp1.800.000"`.
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp{grouped}")
}

//! Normalization from [`RawRecord`] batches to sorted [`Product`] lists.
//!
//! Sentinel filling happens here and nowhere else. Price coercion is
//! delegated to [`crate::parse`].

use chrono::{DateTime, Utc};
use hargacek_core::{Product, NAME_SENTINEL, PLACEHOLDER_IMAGE_URL, SELLER_SENTINEL, URL_SENTINEL};
use url::Url;

use crate::parse::{clean_text, coerce_price};
use crate::types::{RawRecord, SourceBatch};

/// Hands out capture timestamps that never go backwards within one run,
/// even if the wall clock is stepped back mid-run.
#[derive(Debug, Default)]
pub struct CaptureClock {
    last: Option<DateTime<Utc>>,
}

impl CaptureClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wall-clock time, clamped to the last stamp handed out.
    pub fn now(&mut self) -> DateTime<Utc> {
        self.stamp(Utc::now())
    }

    pub(crate) fn stamp(&mut self, observed: DateTime<Utc>) -> DateTime<Utc> {
        let stamped = match self.last {
            Some(last) if last > observed => last,
            _ => observed,
        };
        self.last = Some(stamped);
        stamped
    }
}

/// Normalizes every batch in order, then sorts by ascending price with a
/// name tie-break. The sort is stable, so equal `(price, name)` pairs keep
/// adapter-registration order.
#[must_use]
pub fn normalize(batches: Vec<SourceBatch>) -> Vec<Product> {
    let mut clock = CaptureClock::new();
    let mut products: Vec<Product> = batches
        .into_iter()
        .flat_map(|batch| {
            let source = batch.source;
            batch
                .records
                .into_iter()
                .map(move |record| (source.clone(), record))
        })
        .map(|(source, record)| normalize_record(&source, record, clock.now()))
        .collect();

    sort_products(&mut products);
    products
}

/// Builds one [`Product`], substituting sentinels for anything missing.
#[must_use]
pub fn normalize_record(source: &str, record: RawRecord, captured_at: DateTime<Utc>) -> Product {
    let price = coerce_price(record.price.as_ref());
    Product {
        source: source.to_owned(),
        name: record
            .name
            .as_deref()
            .and_then(clean_text)
            .unwrap_or_else(|| NAME_SENTINEL.to_owned()),
        price,
        seller: record
            .seller
            .as_deref()
            .and_then(clean_text)
            .unwrap_or_else(|| SELLER_SENTINEL.to_owned()),
        url: absolute_http_url(record.url.as_deref()).unwrap_or_else(|| URL_SENTINEL.to_owned()),
        image_url: absolute_http_url(record.image_url.as_deref())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_owned()),
        timestamp: captured_at,
    }
}

pub fn sort_products(products: &mut [Product]) {
    products.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
}

fn absolute_http_url(candidate: Option<&str>) -> Option<String> {
    let trimmed = candidate?.trim();
    let parsed = Url::parse(trimmed).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| trimmed.to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;

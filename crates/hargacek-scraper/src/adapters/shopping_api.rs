use std::time::Duration;

use async_trait::async_trait;
use hargacek_serpapi::{SerpApiClient, SerpApiError, ShoppingResult, DEFAULT_BASE_URL};

use super::SiteAdapter;
use crate::error::ScraperError;
use crate::session::ScrapeSession;
use crate::types::{RawPrice, RawRecord};

pub const DEFAULT_NAME: &str = "Google Shopping";

/// Storefronts kept when filtering aggregated results.
pub const DEFAULT_MARKETPLACES: [&str; 4] = ["tokopedia", "lazada", "bukalapak", "shopee"];

pub const DEFAULT_MAX_RESULTS: usize = 6;

/// Adapter backed by the aggregated shopping-search API.
///
/// Requests go through the session's HTTP client. An API `error` response
/// counts as zero listings rather than a failure.
pub struct ShoppingApiAdapter {
    name: String,
    api_key: String,
    engine: String,
    base_url: String,
    marketplaces: Vec<String>,
    max_results: usize,
}

impl std::fmt::Debug for ShoppingApiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingApiAdapter")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .field("base_url", &self.base_url)
            .field("marketplaces", &self.marketplaces)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl ShoppingApiAdapter {
    #[must_use]
    pub fn new(api_key: &str, engine: &str) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            api_key: api_key.to_string(),
            engine: engine.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            marketplaces: DEFAULT_MARKETPLACES.iter().map(ToString::to_string).collect(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Keeps only results that carry both a link and a storefront name, one
    /// of which mentions an entry of `marketplaces`. An empty list disables
    /// filtering.
    #[must_use]
    pub fn with_marketplaces(mut self, marketplaces: Vec<String>) -> Self {
        self.marketplaces = marketplaces;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn keep(&self, item: &ShoppingResult) -> bool {
        if self.marketplaces.is_empty() {
            return true;
        }
        item.listing_link().is_some()
            && item.source.is_some()
            && item.mentions_any(&self.marketplaces)
    }
}

#[async_trait]
impl SiteAdapter for ShoppingApiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn needs_browser(&self) -> bool {
        false
    }

    async fn fetch_listings(
        &self,
        keyword: &str,
        session: &ScrapeSession,
        _budget: Duration,
    ) -> Result<Vec<RawRecord>, ScraperError> {
        let client = SerpApiClient::from_http_client(
            session.http().clone(),
            &self.api_key,
            &self.engine,
            &self.base_url,
        )?;

        let results = match client.search_shopping(keyword).await {
            Ok(results) => results,
            Err(SerpApiError::Upstream(message)) => {
                tracing::warn!(
                    site = %self.name,
                    error = %message,
                    "shopping API returned an error, treating as no results"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let total = results.len();
        let records: Vec<RawRecord> = results
            .into_iter()
            .filter(|item| self.keep(item))
            .take(self.max_results)
            .map(to_raw_record)
            .collect();

        tracing::debug!(
            site = %self.name,
            total,
            kept = records.len(),
            "filtered shopping results"
        );
        Ok(records)
    }
}

fn to_raw_record(item: ShoppingResult) -> RawRecord {
    let seller = item
        .merchant_name()
        .map(str::to_string)
        .or_else(|| item.source.clone());
    let url = item.listing_link().map(str::to_string);
    let price = match (item.numeric_price(), item.price) {
        (Some(value), _) => Some(RawPrice::Number(value)),
        (None, Some(text)) => Some(RawPrice::Text(text)),
        (None, None) => None,
    };
    RawRecord {
        name: item.title,
        price,
        seller,
        url,
        image_url: item.thumbnail,
    }
}

//! HTTP client for the shopping-search API.
//!
//! Wraps `reqwest` with API key management, retry on transient failures, and
//! typed response decoding. A top-level `"error"` string in the body is
//! surfaced as [`SerpApiError::Upstream`] whatever the HTTP status.

use reqwest::{Client, Url};

use crate::error::SerpApiError;
use crate::retry::retry_with_backoff;
use crate::types::{SearchResponse, ShoppingResult};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

const DEFAULT_MAX_RETRIES: u32 = 1;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Client for the shopping-search API.
///
/// Built with [`SerpApiClient::from_http_client`] on top of a shared
/// `reqwest::Client`, so timeouts and user agent come from the caller.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    engine: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for SerpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApiClient")
            .field("api_key", &"[redacted]")
            .field("engine", &self.engine)
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl SerpApiClient {
    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns [`SerpApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn from_http_client(
        client: Client,
        api_key: &str,
        engine: &str,
        base_url: &str,
    ) -> Result<Self, SerpApiError> {
        // Exactly one trailing slash so `join("search.json")` appends rather
        // than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SerpApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            engine: engine.to_owned(),
            base_url,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the retry policy. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Runs one shopping search and returns the `shopping_results` entries.
    ///
    /// A response without `shopping_results` yields an empty vector. Items
    /// that do not match the [`ShoppingResult`] shape are skipped.
    ///
    /// # Errors
    ///
    /// - [`SerpApiError::Upstream`] if the body carries an `"error"` message.
    /// - [`SerpApiError::UnexpectedStatus`] on a non-2xx status without one.
    /// - [`SerpApiError::Http`] on network failure.
    /// - [`SerpApiError::Deserialize`] if the body is not a JSON object.
    pub async fn search_shopping(&self, query: &str) -> Result<Vec<ShoppingResult>, SerpApiError> {
        let url = self.build_url(query)?;
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_response(&url)
        })
        .await?;

        if let Some(message) = response.error {
            return Err(SerpApiError::Upstream(message));
        }

        let results = response
            .shopping_results
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<ShoppingResult>(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed shopping result");
                    None
                }
            })
            .collect();

        Ok(results)
    }

    /// Builds `search.json?engine=..&q=..&api_key=..` with every value
    /// percent-encoded.
    fn build_url(&self, query: &str) -> Result<Url, SerpApiError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| SerpApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("engine", &self.engine)
            .append_pair("q", query)
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }

    /// Sends one GET and decodes the body. Non-2xx responses whose body
    /// still carries `"error"` map to [`SerpApiError::Upstream`].
    async fn fetch_response(&self, url: &Url) -> Result<SearchResponse, SerpApiError> {
        // reqwest errors embed the request URL, which carries the API key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SerpApiError::Http(e.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SerpApiError::Http(e.without_url()))?;
        let parsed = serde_json::from_str::<SearchResponse>(&body);

        if !status.is_success() {
            if let Ok(SearchResponse {
                error: Some(message),
                ..
            }) = parsed
            {
                return Err(SerpApiError::Upstream(message));
            }
            return Err(SerpApiError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        parsed.map_err(|e| SerpApiError::Deserialize {
            context: format!("search(engine={})", self.engine),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

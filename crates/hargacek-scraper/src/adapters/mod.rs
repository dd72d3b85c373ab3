//! Site adapters: one strategy per marketplace family.
//!
//! Which adapters run is decided by configuration alone: every enabled
//! profile in `sites.yaml` (or the built-in list) becomes a
//! [`MarketplaceAdapter`], and a configured API key adds a
//! [`ShoppingApiAdapter`].

mod marketplace;
mod shopping_api;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hargacek_core::{builtin_sites, load_sites, AppConfig, SiteProfile};

use crate::error::ScraperError;
use crate::session::ScrapeSession;
use crate::types::RawRecord;

pub use marketplace::MarketplaceAdapter;
pub use shopping_api::{ShoppingApiAdapter, DEFAULT_MARKETPLACES, DEFAULT_MAX_RESULTS};

/// A source of listings for one keyword.
///
/// Implementations borrow the shared session for the duration of one call
/// and never close or reconfigure it.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Display name, stamped on every product as its `source`.
    fn name(&self) -> &str;

    /// Whether [`SiteAdapter::fetch_listings`] renders pages in the browser.
    fn needs_browser(&self) -> bool;

    /// Fetches the first results page for `keyword`.
    ///
    /// `budget` is the time left for this adapter; the caller cancels the
    /// call once it runs out. An empty results page is `Ok(vec![])`.
    async fn fetch_listings(
        &self,
        keyword: &str,
        session: &ScrapeSession,
        budget: Duration,
    ) -> Result<Vec<RawRecord>, ScraperError>;
}

/// Site profiles in effect: the configured `sites.yaml`, or the built-in list.
///
/// # Errors
///
/// Returns [`ScraperError::Config`] if the configured file cannot be loaded.
pub fn configured_sites(config: &AppConfig) -> Result<Vec<SiteProfile>, ScraperError> {
    match &config.sites_path {
        Some(path) => Ok(load_sites(path)?.sites),
        None => Ok(builtin_sites()),
    }
}

/// Builds the adapter list in registration order: enabled marketplace
/// profiles first, then the shopping API when a key is configured.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] or
/// [`ScraperError::InvalidBaseUrl`] for a profile that cannot be compiled.
pub fn build_adapters(
    config: &AppConfig,
    sites: Vec<SiteProfile>,
) -> Result<Vec<Arc<dyn SiteAdapter>>, ScraperError> {
    let mut adapters: Vec<Arc<dyn SiteAdapter>> = Vec::new();

    for site in sites {
        if !site.enabled {
            tracing::debug!(site = %site.name, "site disabled, skipping");
            continue;
        }
        adapters.push(Arc::new(MarketplaceAdapter::from_profile(site)?));
    }

    if let Some(api_key) = &config.serpapi_api_key {
        adapters.push(Arc::new(ShoppingApiAdapter::new(
            api_key,
            &config.serpapi_engine,
        )));
    }

    Ok(adapters)
}

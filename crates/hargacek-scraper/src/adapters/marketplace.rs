use std::time::Duration;

use async_trait::async_trait;
use hargacek_core::sites::KEYWORD_PLACEHOLDER;
use hargacek_core::SiteProfile;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use url::Url;

use super::SiteAdapter;
use crate::error::ScraperError;
use crate::extract::{extract_records, CompiledSelectors};
use crate::session::ScrapeSession;
use crate::types::RawRecord;

/// CSS-selector adapter for a marketplace search results page.
#[derive(Debug)]
pub struct MarketplaceAdapter {
    profile: SiteProfile,
    selectors: CompiledSelectors,
    base_url: Url,
}

impl MarketplaceAdapter {
    /// Compiles the profile's selectors and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] or [`ScraperError::InvalidBaseUrl`].
    pub fn from_profile(profile: SiteProfile) -> Result<Self, ScraperError> {
        let selectors = CompiledSelectors::compile(&profile)?;
        let base_url = Url::parse(&profile.base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            site: profile.name.clone(),
            base_url: profile.base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            profile,
            selectors,
            base_url,
        })
    }

    /// Search URL with `keyword` percent-encoded into the template.
    #[must_use]
    pub fn search_url(&self, keyword: &str) -> String {
        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
        self.profile.search_url.replace(KEYWORD_PLACEHOLDER, &encoded)
    }
}

#[async_trait]
impl SiteAdapter for MarketplaceAdapter {
    fn name(&self) -> &str {
        &self.profile.name
    }

    fn needs_browser(&self) -> bool {
        true
    }

    async fn fetch_listings(
        &self,
        keyword: &str,
        session: &ScrapeSession,
        budget: Duration,
    ) -> Result<Vec<RawRecord>, ScraperError> {
        let url = self.search_url(keyword);
        let wait = session.wait_for_content().min(budget);
        tracing::debug!(site = %self.profile.name, %url, "rendering search page");

        let html = session
            .render(&self.profile.name, &url, &self.profile.container, wait)
            .await?;
        let records = extract_records(&html, &self.selectors, &self.base_url);

        tracing::debug!(
            site = %self.profile.name,
            count = records.len(),
            "extracted listings"
        );
        Ok(records)
    }
}

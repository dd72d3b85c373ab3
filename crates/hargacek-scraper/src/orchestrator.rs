//! Runs every configured adapter for one keyword and merges the results.
//!
//! One run opens one [`ScrapeSession`], drives all adapters concurrently
//! against it, and closes it before returning. A failing or slow adapter
//! only loses its own records; the run itself fails only when the session
//! cannot be opened.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use hargacek_core::{AppConfig, Product};
use tokio::time::Instant;

use crate::adapters::{build_adapters, configured_sites, SiteAdapter};
use crate::error::ScraperError;
use crate::normalize::normalize;
use crate::session::{ChromiumOpener, ScrapeSession, SessionOpener};
use crate::types::SourceBatch;

pub const DEFAULT_SITE_BUDGET: Duration = Duration::from_secs(15);
pub const DEFAULT_GLOBAL_DEADLINE: Duration = Duration::from_secs(18);

/// How one adapter fared during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub records: usize,
    pub elapsed: Duration,
    /// Failure reason; `None` when the adapter finished in time.
    pub error: Option<String>,
}

impl SourceReport {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Products plus one [`SourceReport`] per adapter, in registration order.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub products: Vec<Product>,
    pub reports: Vec<SourceReport>,
}

impl SearchOutcome {
    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.reports.iter().filter(|r| !r.succeeded()).count()
    }
}

pub struct Orchestrator {
    adapters: Vec<Arc<dyn SiteAdapter>>,
    opener: Arc<dyn SessionOpener>,
    site_budget: Duration,
    global_deadline: Duration,
}

impl Orchestrator {
    #[must_use]
    pub fn new(adapters: Vec<Arc<dyn SiteAdapter>>, opener: Arc<dyn SessionOpener>) -> Self {
        Self {
            adapters,
            opener,
            site_budget: DEFAULT_SITE_BUDGET,
            global_deadline: DEFAULT_GLOBAL_DEADLINE,
        }
    }

    /// `site_budget` bounds each adapter; `global_deadline` bounds the whole
    /// run, measured from the moment [`Orchestrator::run`] is called.
    #[must_use]
    pub fn with_budgets(mut self, site_budget: Duration, global_deadline: Duration) -> Self {
        self.site_budget = site_budget;
        self.global_deadline = global_deadline;
        self
    }

    /// Production wiring: site profiles and API key from `config`, Chromium
    /// opened on demand.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the sites file cannot be loaded, a profile
    /// does not compile, or the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let adapters = build_adapters(config, configured_sites(config)?)?;
        let opener = ChromiumOpener::from_config(config)?;
        Ok(Self::new(adapters, Arc::new(opener))
            .with_budgets(config.site_budget(), config.global_deadline()))
    }

    #[must_use]
    pub fn adapter_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    /// Searches every adapter for `keyword` and returns the merged, sorted list.
    ///
    /// A blank keyword returns an empty list without opening a session.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] only when the session cannot be opened.
    pub async fn run(&self, keyword: &str) -> Result<Vec<Product>, ScraperError> {
        Ok(self.run_detailed(keyword).await?.products)
    }

    /// Like [`Orchestrator::run`], also reporting how each adapter fared.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] only when the session cannot be opened.
    pub async fn run_detailed(&self, keyword: &str) -> Result<SearchOutcome, ScraperError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(SearchOutcome::default());
        }

        let started = Instant::now();
        let deadline = started + self.global_deadline;
        let needs_browser = self.adapters.iter().any(|a| a.needs_browser());

        let session = self.opener.open(needs_browser).await.map_err(|e| {
            tracing::error!(keyword, error = %e, "failed to open scrape session");
            e
        })?;

        // Every adapter is in flight at once; results come back in
        // registration order regardless of finishing order.
        let pending: Vec<_> = self
            .adapters
            .iter()
            .map(|adapter| self.run_adapter(adapter.as_ref(), keyword, &session, deadline))
            .collect();
        let results: Vec<(SourceBatch, SourceReport)> = join_all(pending).await;

        session.close().await;

        let (batches, reports): (Vec<_>, Vec<_>) = results.into_iter().unzip();
        let products = normalize(batches);
        let outcome = SearchOutcome { products, reports };

        tracing::info!(
            keyword,
            products = outcome.products.len(),
            sources = outcome.reports.len(),
            failed_sources = outcome.failed_sources(),
            elapsed_ms = millis(started.elapsed()),
            "search finished"
        );
        Ok(outcome)
    }

    async fn run_adapter(
        &self,
        adapter: &dyn SiteAdapter,
        keyword: &str,
        session: &ScrapeSession,
        deadline: Instant,
    ) -> (SourceBatch, SourceReport) {
        let name = adapter.name().to_owned();
        let started = Instant::now();
        let bound = (started + self.site_budget).min(deadline);
        let budget = bound.saturating_duration_since(started);

        let result =
            match tokio::time::timeout_at(bound, adapter.fetch_listings(keyword, session, budget))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ScraperError::Timeout {
                    site: name.clone(),
                    budget_ms: millis(budget),
                }),
            };
        let elapsed = started.elapsed();

        match result {
            Ok(records) => {
                tracing::info!(
                    site = %name,
                    count = records.len(),
                    elapsed_ms = millis(elapsed),
                    "source finished"
                );
                let report = SourceReport {
                    source: name.clone(),
                    records: records.len(),
                    elapsed,
                    error: None,
                };
                (SourceBatch::new(name, records), report)
            }
            Err(e) => {
                tracing::warn!(
                    site = %name,
                    error = %e,
                    elapsed_ms = millis(elapsed),
                    "source failed"
                );
                let report = SourceReport {
                    source: name.clone(),
                    records: 0,
                    elapsed,
                    error: Some(e.to_string()),
                };
                (SourceBatch::new(name, Vec::new()), report)
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

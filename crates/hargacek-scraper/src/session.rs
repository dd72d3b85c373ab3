//! Per-run scrape session: one shared browser plus one shared HTTP client.
//!
//! A [`ScrapeSession`] is opened once per orchestration run through a
//! [`SessionOpener`] and closed exactly once when the run ends. Adapters only
//! ever borrow it. Each render opens its own tab, so concurrent adapters
//! never share navigation state.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use hargacek_core::AppConfig;
use tokio::task::JoinHandle;

use crate::error::ScraperError;

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Upper bound on a graceful browser shutdown before the process is killed.
pub const BROWSER_CLOSE_TIMEOUT: Duration = Duration::from_secs(3);

/// Renders a page and returns its HTML once `container` is present.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Opens `url` in a fresh page, waits for navigation to settle and then up
    /// to `wait` for `container` to match, and returns the page HTML.
    async fn render(&self, url: &str, container: &str, wait: Duration)
        -> Result<String, ScraperError>;

    /// Releases the engine. Called once, after every render has finished.
    async fn close(&mut self);
}

/// Opens the session for one orchestration run.
#[async_trait]
pub trait SessionOpener: Send + Sync {
    /// `needs_browser` is `false` when no configured adapter renders pages,
    /// in which case no browser is launched.
    async fn open(&self, needs_browser: bool) -> Result<ScrapeSession, ScraperError>;
}

pub struct ScrapeSession {
    renderer: Option<Box<dyn PageRenderer>>,
    http: reqwest::Client,
    wait_for_content: Duration,
}

impl ScrapeSession {
    /// An HTTP-only session. Attach a browser with [`ScrapeSession::with_renderer`].
    #[must_use]
    pub fn new(http: reqwest::Client, wait_for_content: Duration) -> Self {
        Self {
            renderer: None,
            http,
            wait_for_content,
        }
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn PageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    #[must_use]
    pub fn has_browser(&self) -> bool {
        self.renderer.is_some()
    }

    /// How long a render waits for the result container.
    #[must_use]
    pub fn wait_for_content(&self) -> Duration {
        self.wait_for_content
    }

    /// Renders `url` on behalf of `site`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::BrowserUnavailable`] for an HTTP-only session,
    /// otherwise whatever the renderer reports.
    pub async fn render(
        &self,
        site: &str,
        url: &str,
        container: &str,
        wait: Duration,
    ) -> Result<String, ScraperError> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserUnavailable {
                site: site.to_owned(),
            })?;
        renderer.render(url, container, wait).await
    }

    /// Releases the browser, if any, waiting at most
    /// [`BROWSER_CLOSE_TIMEOUT`]. A renderer that has not finished closing by
    /// then is dropped.
    pub async fn close(mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            if tokio::time::timeout(BROWSER_CLOSE_TIMEOUT, renderer.close())
                .await
                .is_err()
            {
                tracing::warn!(
                    timeout = ?BROWSER_CLOSE_TIMEOUT,
                    "renderer close timed out, dropping it"
                );
            }
        }
    }
}

/// Browser launch options, taken from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    pub user_agent: String,
}

impl BrowserSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            chrome_executable: config.chrome_executable.clone(),
            headless: config.headless,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Headless Chromium driven over `DevTools`.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumRenderer {
    /// Launches a browser process and spawns its event loop.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::BrowserLaunch`] if the configuration is
    /// rejected or the process fails to start.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg(format!("--user-agent={}", settings.user_agent));
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &settings.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|reason| ScraperError::BrowserLaunch { reason })?;

        let (browser, mut handler) =
            Browser::launch(config)
                .await
                .map_err(|e| ScraperError::BrowserLaunch {
                    reason: e.to_string(),
                })?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event error");
                }
            }
        });

        tracing::info!(headless = settings.headless, "browser launched");
        Ok(Self { browser, handler })
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(
        &self,
        url: &str,
        container: &str,
        wait: Duration,
    ) -> Result<String, ScraperError> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| navigation_error(url, &e))?;

        let captured = capture(&page, url, container, wait).await;

        if let Err(e) = page.close().await {
            tracing::debug!(url, error = %e, "page close error");
        }
        captured
    }

    async fn close(&mut self) {
        let browser = &mut self.browser;
        let graceful = async {
            if let Err(e) = browser.close().await {
                tracing::warn!(error = %e, "browser close error");
            }
            if let Err(e) = browser.wait().await {
                tracing::debug!(error = %e, "browser wait error");
            }
        };
        // Half the session bound, so the kill still fits inside it.
        if tokio::time::timeout(BROWSER_CLOSE_TIMEOUT / 2, graceful)
            .await
            .is_err()
        {
            tracing::warn!("browser did not exit in time, killing it");
            if let Some(Err(e)) = self.browser.kill().await {
                tracing::warn!(error = %e, "browser kill error");
            }
        }
        self.handler.abort();
    }
}

impl Drop for ChromiumRenderer {
    fn drop(&mut self) {
        // `Browser` kills the child process on drop; the event loop goes with it.
        self.handler.abort();
    }
}

async fn capture(
    page: &Page,
    url: &str,
    container: &str,
    wait: Duration,
) -> Result<String, ScraperError> {
    page.wait_for_navigation()
        .await
        .map_err(|e| navigation_error(url, &e))?;
    wait_for_selector(page, container, wait).await?;
    page.content()
        .await
        .map_err(|e| navigation_error(url, &e))
}

async fn wait_for_selector(page: &Page, selector: &str, wait: Duration) -> Result<(), ScraperError> {
    let deadline = tokio::time::Instant::now() + wait;
    loop {
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(ScraperError::SelectorTimeout {
                selector: selector.to_owned(),
                waited_ms: u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
            });
        }
        tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
    }
}

fn navigation_error(url: &str, err: &impl std::fmt::Display) -> ScraperError {
    ScraperError::Navigation {
        url: url.to_owned(),
        reason: err.to_string(),
    }
}

/// Production opener: launches Chromium on demand and shares one
/// `reqwest::Client` across runs.
pub struct ChromiumOpener {
    settings: BrowserSettings,
    http: reqwest::Client,
    wait_for_content: Duration,
}

impl ChromiumOpener {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            settings: BrowserSettings::from_config(config),
            http,
            wait_for_content: config.wait_for_content(),
        })
    }
}

#[async_trait]
impl SessionOpener for ChromiumOpener {
    async fn open(&self, needs_browser: bool) -> Result<ScrapeSession, ScraperError> {
        let session = ScrapeSession::new(self.http.clone(), self.wait_for_content);
        if !needs_browser {
            tracing::debug!("no adapter renders pages; opening HTTP-only session");
            return Ok(session);
        }
        let renderer = ChromiumRenderer::launch(&self.settings).await?;
        Ok(session.with_renderer(Box::new(renderer)))
    }
}

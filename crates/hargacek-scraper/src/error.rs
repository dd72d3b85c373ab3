use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    ShoppingApi(#[from] hargacek_serpapi::SerpApiError),

    #[error(transparent)]
    Config(#[from] hargacek_core::ConfigError),

    #[error("browser launch failed: {reason}")]
    BrowserLaunch { reason: String },

    #[error("no browser in this session; {site} needs page rendering")]
    BrowserUnavailable { site: String },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("selector \"{selector}\" did not appear within {waited_ms}ms")]
    SelectorTimeout { selector: String, waited_ms: u64 },

    #[error("invalid CSS selector \"{selector}\" for {site}: {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error("invalid base URL \"{base_url}\" for {site}: {reason}")]
    InvalidBaseUrl {
        site: String,
        base_url: String,
        reason: String,
    },

    #[error("{site} exceeded its {budget_ms}ms budget")]
    Timeout { site: String, budget_ms: u64 },
}

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Optional `sites.yaml`; the built-in marketplace profiles apply when unset.
    pub sites_path: Option<PathBuf>,
    /// Browser binary. `None` lets the automation engine auto-detect Chromium.
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    pub user_agent: String,
    pub wait_for_content_secs: u64,
    pub site_budget_secs: u64,
    pub global_deadline_secs: u64,
    pub http_timeout_secs: u64,
    pub serpapi_api_key: Option<String>,
    pub serpapi_engine: String,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    #[must_use]
    pub fn wait_for_content(&self) -> Duration {
        Duration::from_secs(self.wait_for_content_secs)
    }

    #[must_use]
    pub fn site_budget(&self) -> Duration {
        Duration::from_secs(self.site_budget_secs)
    }

    #[must_use]
    pub fn global_deadline(&self) -> Duration {
        Duration::from_secs(self.global_deadline_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("sites_path", &self.sites_path)
            .field("chrome_executable", &self.chrome_executable)
            .field("headless", &self.headless)
            .field("user_agent", &self.user_agent)
            .field("wait_for_content_secs", &self.wait_for_content_secs)
            .field("site_budget_secs", &self.site_budget_secs)
            .field("global_deadline_secs", &self.global_deadline_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field(
                "serpapi_api_key",
                &self.serpapi_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("serpapi_engine", &self.serpapi_engine)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

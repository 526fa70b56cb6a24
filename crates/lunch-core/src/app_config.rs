use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sources_path: PathBuf,
    pub cache_ttl_minutes: u64,
    /// Six-field cron expression (seconds first) for the refresh job.
    pub refresh_cron: String,
    pub initial_refresh_delay_secs: u64,
    pub scraper_request_timeout_secs: u64,
    pub scraper_pdf_timeout_secs: u64,
    pub scraper_user_agent: String,
}

impl AppConfig {
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes.saturating_mul(60))
    }

    /// Whether the background refresh scheduler should run.
    #[must_use]
    pub fn scheduler_enabled(&self) -> bool {
        self.env != Environment::Test
    }
}

//! Centralized configuration management for loanapps

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/applications";
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Applications collection endpoint, without query string
    pub api_url: String,
    /// Number of applications requested per page (`_limit`)
    pub page_size: u32,
    /// Log file written by both CLI and TUI modes
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "loanapps/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            log_file: PathBuf::from("loanapps.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("LOANAPPS_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let page_size = parse_env_var("LOANAPPS_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);

        let log_file = std::env::var("LOANAPPS_LOG_FILE")
            .unwrap_or_else(|_| "loanapps.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("LOANAPPS_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("LOANAPPS_USER_AGENT")
                .unwrap_or_else(|_| "loanapps/0.1.0".to_string()),
        };

        Ok(Config {
            api_url,
            page_size,
            log_file,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(anyhow::anyhow!("Page size must be at least 1"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least 1 second"));
        }

        reqwest::Url::parse(&self.api_url)
            .with_context(|| format!("Invalid applications API URL: {}", self.api_url))?;

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

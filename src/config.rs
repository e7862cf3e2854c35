use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration for a subtree scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// URL to start crawling from
    pub start_url: String,

    /// Prefix every crawled URL must start with (defaults to the start URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_prefix: Option<String>,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// How long to let client-side rendering settle after navigation
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Upper bound for a single page load, settle delay included
    #[serde(default = "default_page_timeout_secs")]
    pub page_timeout_secs: u64,

    /// Run the browser without a window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Extra command-line flags handed to the browser
    #[serde(default = "default_browser_args")]
    pub browser_args: Vec<String>,

    /// Regex patterns for in-prefix URLs that should still be skipped
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Treat `page#a` and `page` as the same URL
    #[serde(default = "default_strip_fragments")]
    pub strip_fragments: bool,

    /// Where the JSON record set is written
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_settle_delay_ms() -> u64 {
    5000
}

fn default_page_timeout_secs() -> u64 {
    45
}

fn default_headless() -> bool {
    true
}

fn default_browser_args() -> Vec<String> {
    vec![
        "--no-sandbox".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ]
}

fn default_strip_fragments() -> bool {
    true
}

fn default_output_path() -> String {
    "scraped_pages.json".to_string()
}

impl ScrapeConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            root_prefix: None,
            webdriver_url: default_webdriver_url(),
            settle_delay_ms: default_settle_delay_ms(),
            page_timeout_secs: default_page_timeout_secs(),
            headless: default_headless(),
            browser_args: default_browser_args(),
            exclude_patterns: Vec::new(),
            strip_fragments: default_strip_fragments(),
            output_path: default_output_path(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed start URL
    pub fn seed_url(&self) -> Result<Url, ConfigError> {
        parse_url(&self.start_url)
    }

    /// Normalized root prefix. Goes through the URL parser so that it compares
    /// equal to the string form of resolved links.
    pub fn root(&self) -> Result<String, ConfigError> {
        let raw = self.root_prefix.as_deref().unwrap_or(&self.start_url);
        Ok(parse_url(raw)?.to_string())
    }

    /// Use the `WEBDRIVER_URL` environment value, unless the WebDriver URL was
    /// already set away from the default by a config file, flag or builder
    pub fn apply_webdriver_env(&mut self, env_value: Option<String>) {
        let Some(url) = env_value.filter(|url| !url.is_empty()) else {
            return;
        };
        if self.webdriver_url == default_webdriver_url() {
            self.webdriver_url = url;
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

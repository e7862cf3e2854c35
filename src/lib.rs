//! Crawl one site subtree and extract heading-scoped text from every page.
//!
//! Pages are rendered through a WebDriver browser, split into sections under
//! their `h1`-`h3` headings, and deduplicated fragment by fragment across the
//! whole crawl.

pub mod config;
pub mod crawlers;
pub mod dedup;
pub mod error;
pub mod filter;
pub mod frontier;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::ScrapeConfig;
pub use crawlers::{Crawler, PageFetcher, WebDriverFetcher};
pub use error::{ConfigError, FetchError, ScrapeError, TableParseError};
pub use results::{PageRecord, Section};

use filter::UrlFilter;
use std::sync::Arc;

/// Main builder for a subtree scrape
pub struct Scrape {
    config: ScrapeConfig,
}

impl Scrape {
    /// Create a new Scrape builder for the given start URL
    pub fn new(start_url: &str) -> Self {
        Self {
            config: ScrapeConfig::new(start_url),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, ConfigError> {
        let config = ScrapeConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ConfigError> {
        let config = ScrapeConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    /// Restrict crawling to URLs starting with `prefix` instead of the start URL
    pub fn with_root_prefix(mut self, prefix: &str) -> Self {
        self.config.root_prefix = Some(prefix.to_string());
        self
    }

    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    pub fn with_settle_delay_ms(mut self, millis: u64) -> Self {
        self.config.settle_delay_ms = millis;
        self
    }

    pub fn with_page_timeout(mut self, seconds: u64) -> Self {
        self.config.page_timeout_secs = seconds;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn with_strip_fragments(mut self, strip: bool) -> Self {
        self.config.strip_fragments = strip;
        self
    }

    pub fn with_output_path(mut self, path: &str) -> Self {
        self.config.output_path = path.to_string();
        self
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Crawl through a WebDriver browser and return the retained pages
    pub async fn run(mut self) -> Result<Vec<PageRecord>, ScrapeError> {
        self.config
            .apply_webdriver_env(std::env::var("WEBDRIVER_URL").ok());

        let fetcher = WebDriverFetcher::from_config(&self.config);
        let (records, fetcher) = self.run_with(fetcher).await?;
        fetcher.close().await;
        Ok(records)
    }

    /// Crawl with any fetcher, handing it back afterwards
    pub async fn run_with<F: PageFetcher>(
        self,
        fetcher: F,
    ) -> Result<(Vec<PageRecord>, F), ScrapeError> {
        let seed = self.config.seed_url()?;
        let filter = Arc::new(UrlFilter::from_config(&self.config)?);

        let mut crawler = Crawler::new(fetcher, filter);
        let records = crawler.run(&seed).await;
        Ok((records, crawler.into_fetcher()))
    }

    /// Crawl through a WebDriver browser and write the records to the
    /// configured output path
    pub async fn run_to_file(self) -> Result<Vec<PageRecord>, ScrapeError> {
        let output_path = self.config.output_path.clone();
        let records = self.run().await?;
        results::write_json(&records, &output_path)?;
        ::log::info!("Wrote {} pages to {}", records.len(), output_path);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves the same page for every URL
    struct StaticFetcher {
        html: String,
        calls: usize,
    }

    impl PageFetcher for StaticFetcher {
        async fn fetch(&mut self, _url: &str) -> Result<String, FetchError> {
            self.calls += 1;
            Ok(self.html.clone())
        }
    }

    #[tokio::test]
    async fn test_run_with_root_prefix() {
        let fetcher = StaticFetcher {
            html: r#"<h1>Intro</h1><p>hello</p>
                     <a href="/docs/guide">in scope</a>
                     <a href="/blog/">out of scope</a>"#
                .to_string(),
            calls: 0,
        };

        let (records, fetcher) = Scrape::new("https://example.org/docs/intro")
            .with_root_prefix("https://example.org/docs/")
            .run_with(fetcher)
            .await
            .unwrap();

        // Second page repeats the first, so it is dropped
        assert_eq!(fetcher.calls, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://example.org/docs/intro");
    }

    #[tokio::test]
    async fn test_run_with_invalid_start_url() {
        let fetcher = StaticFetcher {
            html: String::new(),
            calls: 0,
        };

        let result = Scrape::new("::not a url::").run_with(fetcher).await;

        assert!(matches!(
            result,
            Err(ScrapeError::Config(ConfigError::InvalidUrl { .. }))
        ));
    }

    #[test]
    fn test_config_str_builder() {
        let scrape = Scrape::new("https://ignored.example/")
            .with_config_str(r#"{"start_url": "https://example.org/docs/", "settle_delay_ms": 100}"#)
            .unwrap()
            .with_headless(false);

        assert_eq!(scrape.config().start_url, "https://example.org/docs/");
        assert_eq!(scrape.config().settle_delay_ms, 100);
        assert!(!scrape.config().headless);
    }
}

use crate::config::ScrapeConfig;
use crate::crawlers::fetcher::PageFetcher;
use crate::error::FetchError;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tokio::time::timeout;

/// Common WebDriver endpoints tried when the configured one refuses
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Step of a page load, used to label failures
#[derive(Debug, Clone, Copy)]
enum LoadStep {
    Navigate,
    ReadSource,
}

/// Fetches pages through a WebDriver-controlled browser.
///
/// The session is opened lazily on the first fetch and reopened on the next
/// fetch after it is lost. A failed URL is never retried.
pub struct WebDriverFetcher {
    webdriver_url: String,
    capabilities: Capabilities,
    settle_delay: Duration,
    page_timeout: Duration,
    client: Option<Client>,
}

impl WebDriverFetcher {
    pub fn new(
        webdriver_url: impl Into<String>,
        capabilities: Capabilities,
        settle_delay: Duration,
        page_timeout: Duration,
    ) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            capabilities,
            settle_delay,
            page_timeout,
            client: None,
        }
    }

    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self::new(
            config.webdriver_url.clone(),
            browser_capabilities(config.headless, &config.browser_args),
            config.settle_delay(),
            config.page_timeout(),
        )
    }

    /// End the browser session, if one was opened
    pub async fn close(mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver session: {}", e);
            }
        }
    }

    /// Connects to the WebDriver instance, falling back to well-known
    /// endpoints if the configured one refuses
    async fn connect(&self) -> Result<Client, FetchError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities.clone());

        let first_error = match builder.connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => e.to_string(),
        };
        ::log::error!(
            "Failed to connect to WebDriver at {}: {}",
            self.webdriver_url,
            first_error
        );

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == self.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            // Don't log fallback errors to avoid log spam
            if let Ok(client) = builder.connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(client);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(FetchError::Connect {
            url: self.webdriver_url.clone(),
            message: first_error,
        })
    }

    async fn load(&self, client: &Client, url: &str) -> Result<String, (LoadStep, CmdError)> {
        client
            .goto(url)
            .await
            .map_err(|e| (LoadStep::Navigate, e))?;

        // Allow client-side rendering to finish
        tokio::time::sleep(self.settle_delay).await;

        client
            .source()
            .await
            .map_err(|e| (LoadStep::ReadSource, e))
    }
}

impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
        let client = match self.client.take() {
            Some(client) => client,
            None => self.connect().await?,
        };

        let started = std::time::Instant::now();
        let outcome = timeout(self.page_timeout, self.load(&client, url)).await;

        match outcome {
            Ok(Ok(html)) => {
                self.client = Some(client);
                ::log::debug!(
                    "Loaded {} in {:.2} seconds",
                    url,
                    started.elapsed().as_secs_f64()
                );
                Ok(html)
            }
            Ok(Err((step, error))) => {
                if is_session_lost(&error) {
                    ::log::warn!("Lost WebDriver session while loading {}", url);
                } else {
                    self.client = Some(client);
                }

                let message = error.to_string();
                Err(match step {
                    LoadStep::Navigate => FetchError::Navigation {
                        url: url.to_string(),
                        message,
                    },
                    LoadStep::ReadSource => FetchError::Source {
                        url: url.to_string(),
                        message,
                    },
                })
            }
            Err(_) => {
                self.client = Some(client);
                Err(FetchError::Timeout {
                    url: url.to_string(),
                    seconds: self.page_timeout.as_secs(),
                })
            }
        }
    }
}

/// Chrome capabilities for the configured window mode and flags
pub fn browser_capabilities(headless: bool, browser_args: &[String]) -> Capabilities {
    let mut args: Vec<String> = Vec::with_capacity(browser_args.len() + 1);
    if headless {
        args.push("--headless=new".to_string());
    }
    args.extend(browser_args.iter().cloned());

    let mut capabilities = Capabilities::new();
    capabilities.insert("browserName".to_string(), json!("chrome"));
    capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    capabilities
}

fn is_session_lost(error: &CmdError) -> bool {
    let message = error.to_string();
    message.contains("Unable to find session") || message.contains("invalid session id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_capabilities() {
        let args = vec!["--no-sandbox".to_string(), "--disable-gpu".to_string()];
        let capabilities = browser_capabilities(true, &args);

        assert_eq!(capabilities["browserName"], "chrome");
        assert_eq!(
            capabilities["goog:chromeOptions"]["args"],
            json!(["--headless=new", "--no-sandbox", "--disable-gpu"])
        );
    }

    #[test]
    fn test_windowed_capabilities() {
        let capabilities = browser_capabilities(false, &[]);
        assert_eq!(capabilities["goog:chromeOptions"]["args"], json!([]));
    }

    #[test]
    fn test_from_config_uses_settle_delay() {
        let mut config = ScrapeConfig::new("https://example.org/docs/");
        config.settle_delay_ms = 250;
        config.webdriver_url = "http://localhost:9515".to_string();

        let fetcher = WebDriverFetcher::from_config(&config);

        assert_eq!(fetcher.settle_delay, Duration::from_millis(250));
        assert_eq!(fetcher.page_timeout, Duration::from_secs(45));
        assert_eq!(fetcher.webdriver_url, "http://localhost:9515");
        assert!(fetcher.client.is_none());
    }
}

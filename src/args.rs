use clap::Parser;
use std::error::Error;
use subtree_scrape::Scrape;

#[derive(Parser, Debug)]
#[command(name = "subtree-scrape")]
#[command(about = "Crawls a site subtree and extracts heading-scoped text as JSON")]
#[command(version)]
pub struct Args {
    /// Seed URL; only URLs starting with it are crawled
    pub uri: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output file for the JSON record set
    #[arg(short, long)]
    pub output: Option<String>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Milliseconds to wait for client-side rendering after navigation
    #[arg(long)]
    pub settle_delay_ms: Option<u64>,

    /// Maximum seconds for a single page load
    #[arg(long)]
    pub page_timeout: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,

    /// Treat URLs that differ only by #fragment as different pages
    #[arg(long)]
    pub keep_fragments: bool,
}

impl Args {
    /// Build the scrape from the config file (if any) with flags layered on top
    pub fn into_scrape(self) -> Result<Scrape, Box<dyn Error>> {
        let mut scrape = match (&self.config, &self.uri) {
            (Some(path), _) => Scrape::new("").with_config_file(path)?,
            (None, Some(uri)) => Scrape::new(uri),
            (None, None) => return Err("either a seed URL or --config is required".into()),
        };

        if let (Some(_), Some(uri)) = (&self.config, &self.uri) {
            let mut config = scrape.config().clone();
            config.start_url = uri.clone();
            scrape = scrape.with_config(config);
        }
        if let Some(output) = &self.output {
            scrape = scrape.with_output_path(output);
        }
        if let Some(url) = &self.webdriver_url {
            scrape = scrape.with_webdriver_url(url);
        }
        if let Some(millis) = self.settle_delay_ms {
            scrape = scrape.with_settle_delay_ms(millis);
        }
        if let Some(seconds) = self.page_timeout {
            scrape = scrape.with_page_timeout(seconds);
        }
        if self.no_headless {
            scrape = scrape.with_headless(false);
        }
        if self.keep_fragments {
            scrape = scrape.with_strip_fragments(false);
        }

        Ok(scrape)
    }
}

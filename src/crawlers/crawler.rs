use crate::crawlers::fetcher::PageFetcher;
use crate::dedup::DedupSet;
use crate::filter::UrlFilter;
use crate::frontier::Frontier;
use crate::parsers::Parser;
use crate::results::PageRecord;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Drives a sequential crawl of one site subtree.
///
/// Each URL is fetched, parsed and folded into the frontier and dedup set
/// before the next one is dequeued.
pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    filter: Arc<UrlFilter>,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, filter: Arc<UrlFilter>) -> Self {
        Self { fetcher, filter }
    }

    /// Crawl everything reachable from `seed` under the filter's root.
    ///
    /// Returns the pages that kept at least one section, in fetch order.
    pub async fn run(&mut self, seed: &Url) -> Vec<PageRecord> {
        ::log::info!("Starting crawl at {} (root {})", seed, self.filter.root());
        let start_time = Instant::now();

        let mut frontier = Frontier::new(Arc::clone(&self.filter));
        let mut dedup = DedupSet::new();
        let mut records = Vec::new();
        let mut failed = 0;

        if frontier.offer([self.filter.normalize(seed)]) == 0 {
            ::log::warn!(
                "Seed {} is outside the crawl root {}",
                seed,
                self.filter.root()
            );
        }

        while let Some(url) = frontier.take_next() {
            let markup = match self.fetcher.fetch(&url).await {
                Ok(markup) => markup,
                Err(e) => {
                    ::log::warn!("Skipping {}: {}", url, e);
                    failed += 1;
                    continue;
                }
            };

            // Frontier entries come from parsed URLs, so this only fails for a
            // hand-built root
            let base = match Url::parse(&url) {
                Ok(base) => base,
                Err(e) => {
                    ::log::warn!("Cannot resolve links against {}: {}", url, e);
                    continue;
                }
            };

            let parsed = Parser::parse(&markup, &base, &mut dedup, &self.filter);
            let queued = frontier.offer(parsed.links);
            ::log::info!(
                "Scraped {} ({} sections, {} new links, {} pending)",
                url,
                parsed.sections.len(),
                queued,
                frontier.pending()
            );

            let record = PageRecord::new(url, parsed.title, parsed.sections);
            if record.has_content() {
                records.push(record);
            } else {
                ::log::debug!("No unique content on {}, dropping it", record.url);
            }
        }

        ::log::info!(
            "Crawling complete - visited {} pages ({} failed), kept {} in {:.2} seconds",
            frontier.visited_count(),
            failed,
            records.len(),
            start_time.elapsed().as_secs_f64()
        );

        records
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Give the fetcher back, e.g. to close a browser session
    pub fn into_fetcher(self) -> F {
        self.fetcher
    }
}

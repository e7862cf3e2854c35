use crate::config::ScrapeConfig;
use crate::error::ConfigError;
use regex::Regex;
use url::Url;

/// Decides which URLs belong to the crawl subtree
#[derive(Debug)]
pub struct UrlFilter {
    root: String,
    exclude_regexes: Vec<Regex>,
    strip_fragments: bool,
}

impl UrlFilter {
    /// Create a filter that accepts everything starting with `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            exclude_regexes: Vec::new(),
            strip_fragments: true,
        }
    }

    /// Build a filter from the scrape configuration
    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ConfigError> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            root: config.root()?,
            exclude_regexes,
            strip_fragments: config.strip_fragments,
        })
    }

    /// Keep or drop `#fragment` parts when normalizing
    pub fn with_strip_fragments(mut self, strip: bool) -> Self {
        self.strip_fragments = strip;
        self
    }

    /// Add an exclusion pattern
    pub fn with_exclude_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.exclude_regexes.push(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// A URL is in scope when its string form starts with the root prefix and
    /// no exclusion pattern matches it
    pub fn is_in_scope(&self, url: &str) -> bool {
        if !url.starts_with(&self.root) {
            return false;
        }

        !self.exclude_regexes.iter().any(|regex| regex.is_match(url))
    }

    /// String form used for scope checks and the visited set
    pub fn normalize(&self, url: &Url) -> String {
        if self.strip_fragments && url.fragment().is_some() {
            let mut normalized = url.clone();
            normalized.set_fragment(None);
            normalized.to_string()
        } else {
            url.to_string()
        }
    }
}

use thiserror::Error;

/// Top-level error for setting up a scrape and writing its output.
///
/// Nothing in here is raised from inside the crawl loop: per-page failures are
/// logged and skipped.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A page could not be fetched. The URL stays visited and is never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to connect to WebDriver at {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to read page source for {url}: {message}")]
    Source { url: String, message: String },

    #[error("Timed out after {seconds}s loading {url}")]
    Timeout { url: String, seconds: u64 },
}

/// A single table element could not be read as rows and columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableParseError {
    #[error("table has no rows")]
    NoRows,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Invalid exclude pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

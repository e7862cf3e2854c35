pub mod content;
pub mod links;
pub mod table;
pub mod text;

#[cfg(test)]
mod tests;

use crate::dedup::DedupSet;
use crate::filter::UrlFilter;
use crate::results::Section;
use scraper::Html;
use std::collections::HashSet;
use url::Url;

/// Result of parsing one rendered page
#[derive(Debug)]
pub struct ParseResult {
    /// Trimmed page title, or "No Title"
    pub title: String,
    /// Non-empty sections in document order
    pub sections: Vec<Section>,
    /// In-scope absolute links found on the page
    pub links: HashSet<String>,
}

/// Main parser that runs content and link extraction over a single parse of
/// the markup
pub struct Parser;

impl Parser {
    /// Parse rendered markup fetched from `base_url`.
    ///
    /// Content fragments already present in `dedup` are dropped, and new ones
    /// are recorded there.
    pub fn parse(
        markup: &str,
        base_url: &Url,
        dedup: &mut DedupSet,
        filter: &UrlFilter,
    ) -> ParseResult {
        let doc = Html::parse_document(markup);

        let title = content::extract_title(&doc);
        let sections = content::extract_from_document(&doc, dedup);
        let links = links::extract_links_from(&doc, base_url, filter);

        ParseResult {
            title,
            sections,
            links,
        }
    }
}

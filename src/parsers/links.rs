use crate::filter::UrlFilter;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector is valid"));

/// Parses HTML content and returns the in-scope absolute URLs it links to
pub fn extract_links(base_url: &Url, html: &str, filter: &UrlFilter) -> HashSet<String> {
    let doc = Html::parse_document(html);
    extract_links_from(&doc, base_url, filter)
}

/// Link extraction over an already parsed document
pub fn extract_links_from(doc: &Html, base_url: &Url, filter: &UrlFilter) -> HashSet<String> {
    let mut links = HashSet::new();
    let mut seen = 0;

    for href in doc
        .select(&LINK_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
    {
        seen += 1;
        let Ok(resolved) = base_url.join(href) else {
            ::log::trace!("Ignoring unresolvable href {:?} on {}", href, base_url);
            continue;
        };

        let normalized = filter.normalize(&resolved);
        if filter.is_in_scope(&normalized) {
            links.insert(normalized);
        }
    }

    ::log::debug!(
        "Found {} links on {}, {} in scope",
        seen,
        base_url,
        links.len()
    );
    links
}

//! Heading-scoped section extraction
//!
//! Walks the block-level elements of a page in document order and groups the
//! text that follows each `h1`-`h3` under that heading. Every content entry is
//! checked against the crawl-wide [`DedupSet`] before it is kept.

use crate::dedup::DedupSet;
use crate::parsers::table::parse_table;
use crate::parsers::text::{concat_text, flatten_text};
use crate::results::Section;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Title used when the document has no `<title>` element
pub const NO_TITLE: &str = "No Title";

static BLOCK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, p, ul, ol, div, table").expect("block selector is valid")
});

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));

/// Kind of block element the extractor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Heading,
    Text,
    Table,
}

impl Block {
    fn classify(name: &str) -> Option<Self> {
        match name {
            "h1" | "h2" | "h3" => Some(Block::Heading),
            "p" | "ul" | "ol" | "div" => Some(Block::Text),
            "table" => Some(Block::Table),
            _ => None,
        }
    }
}

/// Extraction state. Content is only collected while a section is open.
#[derive(Debug)]
enum SectionState {
    NoSection,
    OpenSection(Section),
}

impl SectionState {
    /// Close the open section, keeping it only if it collected content
    fn flush(&mut self, sections: &mut Vec<Section>) {
        if let SectionState::OpenSection(section) =
            std::mem::replace(self, SectionState::NoSection)
        {
            if !section.content.is_empty() {
                sections.push(section);
            }
        }
    }
}

/// Parse markup and extract its title and sections
pub fn extract_sections(markup: &str, dedup: &mut DedupSet) -> (String, Vec<Section>) {
    let document = Html::parse_document(markup);
    (extract_title(&document), extract_from_document(&document, dedup))
}

/// Trimmed text of the first `<title>`, or [`NO_TITLE`]
pub fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(concat_text)
        .unwrap_or_else(|| NO_TITLE.to_string())
}

/// Run the section state machine over an already parsed document
pub fn extract_from_document(document: &Html, dedup: &mut DedupSet) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut state = SectionState::NoSection;

    for element in document.select(&BLOCK_SELECTOR) {
        let Some(block) = Block::classify(element.value().name()) else {
            continue;
        };

        if block == Block::Heading {
            state.flush(&mut sections);
            state = SectionState::OpenSection(Section::new(concat_text(element)));
            continue;
        }

        // Anything before the first heading has nowhere to go
        let SectionState::OpenSection(section) = &mut state else {
            continue;
        };

        let text = if block == Block::Table {
            table_text(element)
        } else {
            Some(flatten_text(element))
        };
        if let Some(text) = text {
            push_unique(section, text, dedup);
        }
    }

    state.flush(&mut sections);
    sections
}

fn table_text(element: ElementRef) -> Option<String> {
    match parse_table(element) {
        Ok(table) => Some(table.to_content()),
        Err(e) => {
            ::log::debug!("Skipping table: {}", e);
            None
        }
    }
}

/// Append `text` unless it is empty or was already emitted anywhere in the crawl
fn push_unique(section: &mut Section, text: String, dedup: &mut DedupSet) {
    if text.is_empty() || !dedup.insert_new(&text) {
        return;
    }
    section.content.push(text);
}

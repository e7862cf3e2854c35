//! Text flattening helpers shared by the content and table parsers

use scraper::ElementRef;

/// Elements whose text is never rendered on the page
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Descendant text nodes of `element` in document order, skipping anything
/// inside a script, style, noscript or template element
pub fn visible_text(element: ElementRef<'_>) -> impl Iterator<Item = &str> {
    element.descendants().filter_map(move |node| {
        let text = node.value().as_text()?;
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
        if hidden { None } else { Some(&**text) }
    })
}

/// Visible text nodes joined with a single space, then trimmed.
///
/// Whitespace inside the text nodes is left alone, so a paragraph keeps its
/// own line breaks.
pub fn flatten_text(element: ElementRef) -> String {
    visible_text(element)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Visible text concatenated without separators, then trimmed.
/// Used for headings and the page title.
pub fn concat_text(element: ElementRef) -> String {
    visible_text(element).collect::<String>().trim().to_string()
}

/// Collapses every run of whitespace into a single space
pub fn collapse_whitespace(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}

use crate::dedup::DedupSet;
use crate::filter::UrlFilter;
use crate::parsers::Parser;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_content_and_links() {
        let html = r#"<html><head><title>Graduate Program</title></head><body>
            <nav><a href="/docs/admissions">Admissions</a></nav>
            <h1>Overview</h1>
            <p>Welcome to the docs</p>
            <h2>Deadlines</h2>
            <table>
                <tr><th>Term</th><th>Date</th></tr>
                <tr><td>Fall</td><td>Dec 1</td></tr>
            </table>
            <a href="https://external.org/x">Elsewhere</a>
        </body></html>"#;
        let base = Url::parse("https://example.org/docs/").unwrap();
        let filter = UrlFilter::new("https://example.org/docs/");
        let mut dedup = DedupSet::new();

        let result = Parser::parse(html, &base, &mut dedup, &filter);

        assert_eq!(result.title, "Graduate Program");
        assert_eq!(result.sections.len(), 2);
        assert_eq!(result.sections[0].heading, "Overview");
        assert_eq!(result.sections[0].content, vec!["Welcome to the docs"]);
        assert_eq!(result.sections[1].heading, "Deadlines");
        assert_eq!(
            result.sections[1].content,
            vec!["\nTable:\nTerm | Date\n-----------\nFall | Dec 1"]
        );
        assert_eq!(result.links.len(), 1);
        assert!(result.links.contains("https://example.org/docs/admissions"));
    }
}

use crate::error::TableParseError;
use crate::parsers::table::{Table, parse_table};
use scraper::{Html, Selector};

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_first_table(html: &str) -> Result<Table, TableParseError> {
        let doc = Html::parse_fragment(html);
        let selector = Selector::parse("table").unwrap();
        parse_table(doc.select(&selector).next().unwrap())
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_by_two_rendering() {
        let table = Table {
            header: strings(&["Term", "Definition"]),
            rows: vec![strings(&["a", "b"]), strings(&["c", "d"])],
        };

        assert_eq!(
            table.to_content(),
            "\nTable:\nTerm | Definition\n-----------------\na | b\nc | d"
        );
    }

    #[test]
    fn test_separator_counts_characters() {
        let table = Table {
            header: strings(&["Größe", "Ä"]),
            rows: vec![],
        };

        assert_eq!(table.render(), "Größe | Ä\n---------");
    }

    #[test]
    fn test_header_from_th_row() {
        let table = parse_first_table(
            "<table><tr><th> Name </th><th>Role</th></tr>\
             <tr><td>Ada</td><td>Engineer</td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.header, strings(&["Name", "Role"]));
        assert_eq!(table.rows, vec![strings(&["Ada", "Engineer"])]);
    }

    #[test]
    fn test_header_from_thead_with_td_cells() {
        let table = parse_first_table(
            "<table><thead><tr><td>Year</td><td>Count</td></tr></thead>\
             <tbody><tr><td>2024</td><td>7</td></tr></tbody></table>",
        )
        .unwrap();

        assert_eq!(table.header, strings(&["Year", "Count"]));
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_headerless_table_uses_column_indices() {
        let table =
            parse_first_table("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>")
                .unwrap();

        assert_eq!(table.header, strings(&["0", "1"]));
        assert_eq!(table.rows, vec![strings(&["a", "b"]), strings(&["c", "d"])]);
    }

    #[test]
    fn test_cell_whitespace_is_collapsed() {
        let table = parse_first_table(
            "<table><tr><th>Course</th></tr><tr><td>\n  Intro   to\n <b>Rust</b> </td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.rows, vec![strings(&["Intro to Rust"])]);
    }

    #[test]
    fn test_colspan_repeats_value() {
        let table = parse_first_table(
            "<table><tr><th>a</th><th>b</th><th>c</th></tr>\
             <tr><td colspan=\"2\">wide</td><td>x</td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.rows, vec![strings(&["wide", "wide", "x"])]);
    }

    #[test]
    fn test_nested_table_rows_are_ignored() {
        let table = parse_first_table(
            "<table><tr><th>Outer</th></tr>\
             <tr><td><table><tr><td>in1</td><td>in2</td></tr></table></td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.header, strings(&["Outer"]));
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let result = parse_first_table(
            "<table><tr><th>a</th><th>b</th></tr><tr><td>1</td><td>2</td><td>3</td></tr></table>",
        );

        assert_eq!(
            result,
            Err(TableParseError::RaggedRow {
                row: 1,
                found: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn test_table_without_rows_is_an_error() {
        assert_eq!(parse_first_table("<table></table>"), Err(TableParseError::NoRows));
        assert_eq!(
            parse_first_table("<table><tr></tr></table>"),
            Err(TableParseError::NoRows)
        );
    }

    #[test]
    fn test_rowspan_repeats_value_down() {
        let table = parse_first_table(
            "<table><tr><th>Term</th><th>Course</th><th>Room</th></tr>\
             <tr><td rowspan=\"3\">Fall</td><td>COMP 101</td><td rowspan=\"2\">SN 014</td></tr>\
             <tr><td>COMP 102</td></tr>\
             <tr><td>COMP 103</td><td>FB 009</td></tr></table>",
        )
        .unwrap();

        assert_eq!(
            table.rows,
            vec![
                strings(&["Fall", "COMP 101", "SN 014"]),
                strings(&["Fall", "COMP 102", "SN 014"]),
                strings(&["Fall", "COMP 103", "FB 009"]),
            ]
        );
    }

    #[test]
    fn test_rowspan_and_colspan_together() {
        let table = parse_first_table(
            "<table><tr><th>a</th><th>b</th><th>c</th></tr>\
             <tr><td rowspan=\"2\" colspan=\"2\">block</td><td>1</td></tr>\
             <tr><td>2</td></tr></table>",
        )
        .unwrap();

        assert_eq!(
            table.rows,
            vec![
                strings(&["block", "block", "1"]),
                strings(&["block", "block", "2"]),
            ]
        );
    }

    #[test]
    fn test_cell_text_skips_scripts() {
        let table = parse_first_table(
            "<table><tr><th>Name</th></tr><tr><td>Ada<script>x()</script></td></tr></table>",
        )
        .unwrap();

        assert_eq!(table.rows, vec![strings(&["Ada"])]);
    }
}

use crate::error::TableParseError;
use crate::parsers::text::{collapse_whitespace, visible_text};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("tr selector is valid"));

/// Larger spans are clamped so a bogus attribute cannot blow up a row
const MAX_SPAN: usize = 1000;

/// Label placed in front of every rendered table
pub const TABLE_LABEL: &str = "\nTable:\n";

/// A table read into a header row and equally wide data rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Header cells joined by " | ", a dash line of the same length, then one
    /// line per data row
    pub fn render(&self) -> String {
        let header_line = self.header.join(" | ");
        let separator = "-".repeat(header_line.chars().count());

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(header_line);
        lines.push(separator);
        for row in &self.rows {
            lines.push(row.join(" | "));
        }
        lines.join("\n")
    }

    /// Rendered text with the table label in front, ready to be used as a
    /// section content entry
    pub fn to_content(&self) -> String {
        format!("{}{}", TABLE_LABEL, self.render())
    }
}

/// Read a `<table>` element into rows and columns.
///
/// `colspan` and `rowspan` repeat the cell value into the covered cells.
/// The header is the `<thead>` row, or the first row when it consists only of
/// `<th>` cells. Without one, columns are named by index. Rows of nested tables
/// belong to those tables and are ignored here.
pub fn parse_table(table: ElementRef) -> Result<Table, TableParseError> {
    let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
    // Cells spanning down from earlier rows, by column: (value, rows left)
    let mut carried: Vec<Option<(String, usize)>> = Vec::new();

    for row in table.select(&ROW_SELECTOR) {
        if !belongs_to(row, table) {
            continue;
        }

        let mut all_header_cells = true;
        let mut has_own_cells = false;
        let mut cells = Vec::new();
        for cell in row.children().filter_map(ElementRef::wrap) {
            let name = cell.value().name();
            if name != "td" && name != "th" {
                continue;
            }
            take_carried(&mut carried, &mut cells);
            all_header_cells &= name == "th";
            has_own_cells = true;

            let text = collapse_whitespace(&visible_text(cell).collect::<String>());
            let rows_left = span(cell, "rowspan") - 1;
            for _ in 0..span(cell, "colspan") {
                if rows_left > 0 {
                    let column = cells.len();
                    if carried.len() <= column {
                        carried.resize(column + 1, None);
                    }
                    carried[column] = Some((text.clone(), rows_left));
                }
                cells.push(text.clone());
            }
        }
        take_carried(&mut carried, &mut cells);

        if cells.is_empty() {
            continue;
        }
        let is_header = (has_own_cells && all_header_cells) || in_thead(row);
        rows.push((is_header, cells));
    }

    let Some((first_is_header, first)) = rows.first() else {
        return Err(TableParseError::NoRows);
    };

    let (header, data_start) = if *first_is_header {
        (first.clone(), 1)
    } else {
        ((0..first.len()).map(|i| i.to_string()).collect(), 0)
    };

    let mut data = Vec::with_capacity(rows.len());
    for (index, (_, cells)) in rows.into_iter().enumerate().skip(data_start) {
        if cells.len() != header.len() {
            return Err(TableParseError::RaggedRow {
                row: index,
                found: cells.len(),
                expected: header.len(),
            });
        }
        data.push(cells);
    }

    Ok(Table { header, rows: data })
}

/// Fill `cells` from the columns still covered by a rowspan above
fn take_carried(carried: &mut [Option<(String, usize)>], cells: &mut Vec<String>) {
    while let Some(slot) = carried.get_mut(cells.len()) {
        let Some((text, rows_left)) = slot.as_mut() else {
            break;
        };
        cells.push(text.clone());
        *rows_left -= 1;
        if *rows_left == 0 {
            *slot = None;
        }
    }
}

/// `colspan` / `rowspan` value, at least 1
fn span(cell: ElementRef, attr: &str) -> usize {
    cell.value()
        .attr(attr)
        .and_then(|span| span.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .map_or(1, |span| span.min(MAX_SPAN))
}

/// True when `table` is the closest `<table>` ancestor of `row`
fn belongs_to(row: ElementRef, table: ElementRef) -> bool {
    row.ancestors()
        .find(|node| {
            node.value()
                .as_element()
                .is_some_and(|element| element.name() == "table")
        })
        .is_some_and(|node| node.id() == table.id())
}

fn in_thead(row: ElementRef) -> bool {
    row.parent()
        .and_then(|node| node.value().as_element().map(|element| element.name() == "thead"))
        .unwrap_or(false)
}

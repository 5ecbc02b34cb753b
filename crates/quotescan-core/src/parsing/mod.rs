pub mod header;
pub mod rows;

use crate::extraction::PageTables;
use crate::model::{Document, Record};
use crate::schema::Column;
use crate::ExtractOptions;
use header::ColumnBinding;
use tracing::debug;

/// Align raw table rows from every page to the fixed column schema.
///
/// Rows keep page order and within-page order. Blank rows and header rows are
/// dropped; the most recent header decides which column each cell position
/// belongs to, and carries over to later tables and pages.
pub fn normalize_tables(pages: &[PageTables], options: &ExtractOptions) -> Document {
    let mut binding = ColumnBinding::positional();
    let mut records = Vec::new();

    for page in pages {
        for (table_index, table) in page.tables.iter().enumerate() {
            for (row_index, row) in table.rows.iter().enumerate() {
                let cells: Vec<&str> = row
                    .iter()
                    .map(|c| c.as_deref().map(str::trim).unwrap_or(""))
                    .collect();

                if cells.iter().all(|c| c.is_empty()) {
                    continue;
                }

                if let Some(header) = header::recognize(&cells) {
                    debug!(
                        page = page.page_number,
                        table = table_index,
                        row = row_index,
                        columns = header.slots().iter().flatten().count(),
                        "header row"
                    );
                    binding = header;
                    continue;
                }

                if options.skip_report_furniture && rows::is_report_furniture(&cells) {
                    debug!(page = page.page_number, row = row_index, "skipped report furniture");
                    continue;
                }

                let record = binding.bind(&cells);
                if record.is_blank() {
                    continue;
                }

                if options.require_quote_number && !accepts_quote_number(&record) {
                    debug!(
                        page = page.page_number,
                        row = row_index,
                        quote = record.get(Column::QuoteNumber),
                        "skipped row without quote number"
                    );
                    continue;
                }

                records.push(record);
            }
        }
    }

    Document::new(records)
}

fn accepts_quote_number(record: &Record) -> bool {
    rows::is_quote_number(record.get(Column::QuoteNumber))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::RawTable;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable {
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                        .collect()
                })
                .collect(),
        }
    }

    fn page(number: usize, tables: Vec<RawTable>) -> PageTables {
        PageTables {
            page_number: number,
            tables,
        }
    }

    #[test]
    fn test_header_excluded_and_columns_bound() {
        let pages = vec![page(
            1,
            vec![table(&[
                &["Quote #", "PartNum", "Customer Name", "State"],
                &["Q1001", "PX-22", "Acme Inc", "NY"],
                &["Q1002", "PX-23", "Beta LLC", "IL"],
            ])],
        )];

        let doc = normalize_tables(&pages, &ExtractOptions::default());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records()[0].get(Column::State), "NY");
        assert_eq!(doc.records()[1].get(Column::CustomerName), "Beta LLC");
        assert_eq!(doc.records()[1].get(Column::Vendor), "");
    }

    #[test]
    fn test_positional_without_header() {
        let pages = vec![page(1, vec![table(&[&["100234", "PX-22", "Widget"]])])];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        assert_eq!(doc.len(), 1);
        let r = &doc.records()[0];
        assert_eq!(r.get(Column::QuoteNumber), "100234");
        assert_eq!(r.get(Column::Description), "Widget");
        assert_eq!(r.get(Column::Vendor), "");
    }

    #[test]
    fn test_blank_rows_skipped_and_cells_trimmed() {
        let pages = vec![page(
            1,
            vec![RawTable {
                rows: vec![
                    vec![None, None],
                    vec![Some("  ".into()), None],
                    vec![Some(" 100234 ".into()), Some("PX-22\n".into())],
                ],
            }],
        )];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.records()[0].get(Column::QuoteNumber), "100234");
        assert_eq!(doc.records()[0].get(Column::PartNum), "PX-22");
    }

    #[test]
    fn test_overlong_rows_truncated() {
        let cells: Vec<String> = (0..18).map(|i| format!("c{i}")).collect();
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let pages = vec![page(1, vec![table(&[refs.as_slice()])])];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        let r = &doc.records()[0];
        assert_eq!(r.get(Column::Milestone), "c13");
        assert!(r.iter().all(|(_, v)| v != "c14"));
    }

    #[test]
    fn test_binding_carries_across_pages() {
        let pages = vec![
            page(
                1,
                vec![table(&[
                    &["Quote #", "State"],
                    &["100001", "NY"],
                ])],
            ),
            page(2, vec![table(&[&["100002", "IL"]])]),
        ];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records()[1].get(Column::State), "IL");
        assert_eq!(doc.records()[1].get(Column::PartNum), "");
    }

    #[test]
    fn test_repeated_header_on_later_page_excluded() {
        let header: &[&str] = &["Quote #", "PartNum"];
        let pages = vec![
            page(1, vec![table(&[header, &["100001", "A"]])]),
            page(2, vec![table(&[header, &["100002", "B"]])]),
        ];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        let quotes: Vec<&str> = doc.iter().map(|r| r.get(Column::QuoteNumber)).collect();
        assert_eq!(quotes, vec!["100001", "100002"]);
    }

    #[test]
    fn test_furniture_toggle() {
        let pages = vec![page(
            1,
            vec![table(&[
                &["Quote #", "PartNum"],
                &["100001", "A"],
                &["CRM Total", "1"],
            ])],
        )];

        let doc = normalize_tables(&pages, &ExtractOptions::default());
        assert_eq!(doc.len(), 1);

        let keep = ExtractOptions {
            skip_report_furniture: false,
            ..Default::default()
        };
        assert_eq!(normalize_tables(&pages, &keep).len(), 2);
    }

    #[test]
    fn test_continuation_rows_survive_furniture_filter() {
        let pages = vec![page(
            1,
            vec![table(&[
                &["Quote #", "Description"],
                &["100234", "Widget"],
                &["", "second line"],
                &["", "CRM connector license"],
                &["", "Total care kit"],
                &["CRM Total", ""],
            ])],
        )];
        let doc = normalize_tables(&pages, &ExtractOptions::default());
        let descriptions: Vec<&str> = doc.iter().map(|r| r.get(Column::Description)).collect();
        assert_eq!(
            descriptions,
            vec!["Widget", "second line", "CRM connector license", "Total care kit"]
        );
    }

    #[test]
    fn test_require_quote_number() {
        let pages = vec![page(
            1,
            vec![table(&[
                &["Quote #", "Description"],
                &["100001", "Widget"],
                &["", "continued description"],
            ])],
        )];
        let strict = ExtractOptions {
            require_quote_number: true,
            ..Default::default()
        };
        assert_eq!(normalize_tables(&pages, &strict).len(), 1);
        assert_eq!(normalize_tables(&pages, &ExtractOptions::default()).len(), 2);
    }

    #[test]
    fn test_no_tables_gives_empty_document() {
        let pages = vec![page(1, vec![]), page(2, vec![])];
        assert!(normalize_tables(&pages, &ExtractOptions::default()).is_empty());
    }
}

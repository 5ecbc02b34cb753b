use quotescan_core::model::Document;
use quotescan_core::Column;

pub fn print(document: &Document) {
    println!("{}", format_document(document));
}

/// Render records as an aligned text table.
///
/// Columns that are empty in every record are left out to keep the table
/// within a terminal's width.
pub fn format_document(document: &Document) -> String {
    if document.is_empty() {
        return "No data extracted.".to_string();
    }

    let columns: Vec<Column> = Column::ALL
        .iter()
        .copied()
        .filter(|c| document.iter().any(|r| !r.get(*c).is_empty()))
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            document
                .iter()
                .map(|r| r.get(*c).chars().count())
                .chain(std::iter::once(c.name().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", c.name(), width = w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));

    for record in document {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", record.get(*c), width = w))
            .collect();
        out.push('\n');
        out.push_str(cells.join("  ").trim_end());
    }

    out
}

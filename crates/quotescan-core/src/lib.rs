pub mod error;
pub mod extraction;
pub mod filter;
pub mod model;
pub mod parsing;
pub mod schema;

use error::QuoteError;
use extraction::TableSource;
use model::Document;
use tracing::info;

pub use filter::Filter;
pub use model::Record;
pub use schema::Column;

/// Options for turning detected table rows into records.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Drop report titles, print stamps and total lines that fall inside the
    /// table region.
    pub skip_report_furniture: bool,
    /// Keep only rows whose `Quote #` is a six-or-more digit number.
    pub require_quote_number: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            skip_report_furniture: true,
            require_quote_number: false,
        }
    }
}

/// Main API entry point: extract the quote review rows from a PDF.
///
/// Returns every data row across all pages in document order. A PDF without
/// any recognizable table yields an empty document rather than an error.
pub fn extract(
    pdf_bytes: &[u8],
    source: &dyn TableSource,
    options: &ExtractOptions,
) -> Result<Document, QuoteError> {
    extraction::check_pdf_signature(pdf_bytes)?;

    let pages = source.extract_tables(pdf_bytes)?;
    let table_count: usize = pages.iter().map(|p| p.tables.len()).sum();

    let document = parsing::normalize_tables(&pages, options);

    info!(
        backend = source.backend_name(),
        bytes = pdf_bytes.len(),
        pages = pages.len(),
        tables = table_count,
        records = document.len(),
        "extracted quote review"
    );

    Ok(document)
}

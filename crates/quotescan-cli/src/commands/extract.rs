use quotescan_core::error::QuoteError;
use quotescan_core::extraction::{Backend, GeometryOptions};
use quotescan_core::model::Document;
use quotescan_core::ExtractOptions;
use std::path::{Path, PathBuf};

use crate::output;
use crate::ExtractArgs;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    args: &ExtractArgs,
) -> Result<(), QuoteError> {
    let document = extract_file(&pdf_file, args)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&document)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} record(s), written to {}",
                document.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&document)?,
            _ => output::table::print(&document),
        },
    }

    Ok(())
}

/// Read a PDF from disk and extract its records with the chosen backend.
pub fn extract_file(pdf_file: &Path, args: &ExtractArgs) -> Result<Document, QuoteError> {
    let pdf_bytes = std::fs::read(pdf_file)?;
    let backend: Backend = args.backend.parse()?;
    let source = backend.source(GeometryOptions::default());
    let options = ExtractOptions {
        skip_report_furniture: !args.keep_furniture,
        require_quote_number: args.strict,
    };
    quotescan_core::extract(&pdf_bytes, source.as_ref(), &options)
}

use quotescan_core::error::QuoteError;
use quotescan_core::model::Document;
use quotescan_core::Filter;
use std::path::PathBuf;

use crate::commands::extract::extract_file;
use crate::output;
use crate::ExtractArgs;

pub fn run(
    input_file: PathBuf,
    column: &str,
    value: &str,
    output_format: &str,
    args: &ExtractArgs,
) -> Result<(), QuoteError> {
    // Validate the column before doing any extraction work
    let filter = Filter::new(column, value)?;

    let is_json = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let document = if is_json {
        let json_bytes = std::fs::read(&input_file)?;
        serde_json::from_slice::<Document>(&json_bytes)?
    } else {
        extract_file(&input_file, args)?
    };

    let results = document.filter(Some(&filter));

    match output_format {
        "json" => output::json::print(&results)?,
        _ => {
            output::table::print(&results);
            eprintln!(
                "{} of {} record(s) match {} ~ '{}'",
                results.len(),
                document.len(),
                filter.column(),
                value
            );
        }
    }

    Ok(())
}

use quotescan_core::error::QuoteError;
use quotescan_core::model::Document;

pub fn print(document: &Document) -> Result<(), QuoteError> {
    let json = serde_json::to_string_pretty(document)?;
    println!("{json}");
    Ok(())
}

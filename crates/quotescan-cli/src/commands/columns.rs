use quotescan_core::error::QuoteError;
use quotescan_core::Column;

pub fn run() -> Result<(), QuoteError> {
    for column in Column::ALL {
        println!("{column}");
    }
    Ok(())
}

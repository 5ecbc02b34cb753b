use crate::error::QuoteError;
use crate::model::Record;
use crate::schema::Column;

/// Case-insensitive substring match against one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: Column,
    needle: String,
}

impl Filter {
    /// Build a filter from a column name as a user typed it.
    ///
    /// Unknown names fail with [`QuoteError::UnknownColumn`].
    pub fn new(column: &str, value: &str) -> Result<Filter, QuoteError> {
        Ok(Filter::for_column(Column::parse(column)?, value))
    }

    pub fn for_column(column: Column, value: &str) -> Filter {
        Filter {
            column,
            needle: value.to_lowercase(),
        }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    /// An empty search value matches every record.
    pub fn matches(&self, record: &Record) -> bool {
        self.needle.is_empty() || record.get(self.column).to_lowercase().contains(&self.needle)
    }
}

use crate::error::QuoteError;
use std::fmt;

/// One column of the Daily Quote Review table.
///
/// The set is fixed and ordered; `index()` is the position of the column in
/// every [`Record`](crate::model::Record).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    QuoteNumber,
    PartNum,
    Description,
    Vendor,
    Qty,
    AddDate,
    ExpClose,
    AddedBy,
    State,
    CustomerName,
    ListEach,
    ExtPrice,
    Summary,
    Milestone,
}

impl Column {
    pub const COUNT: usize = 14;

    pub const ALL: [Column; Column::COUNT] = [
        Column::QuoteNumber,
        Column::PartNum,
        Column::Description,
        Column::Vendor,
        Column::Qty,
        Column::AddDate,
        Column::ExpClose,
        Column::AddedBy,
        Column::State,
        Column::CustomerName,
        Column::ListEach,
        Column::ExtPrice,
        Column::Summary,
        Column::Milestone,
    ];

    /// Column name as printed in the report header.
    pub fn name(self) -> &'static str {
        match self {
            Column::QuoteNumber => "Quote #",
            Column::PartNum => "PartNum",
            Column::Description => "Description",
            Column::Vendor => "Vendor",
            Column::Qty => "Qty",
            Column::AddDate => "AddDate",
            Column::ExpClose => "Exp. Close",
            Column::AddedBy => "Added By",
            Column::State => "State",
            Column::CustomerName => "Customer Name",
            Column::ListEach => "ListEach",
            Column::ExtPrice => "Ext_Price",
            Column::Summary => "Summary",
            Column::Milestone => "Milestone",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a column by name. Case-insensitive, surrounding whitespace ignored.
    pub fn from_name(name: &str) -> Option<Column> {
        let name = name.trim();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Like [`Column::from_name`], but reports an unknown name as an error.
    pub fn parse(name: &str) -> Result<Column, QuoteError> {
        Column::from_name(name).ok_or_else(|| QuoteError::UnknownColumn(name.trim().to_string()))
    }

    pub fn names() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

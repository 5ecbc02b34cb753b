use crate::error::QuoteError;
use crate::filter::Filter;
use crate::schema::Column;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// One data row of the quote review table.
///
/// Holds a value for every [`Column`]; cells the PDF did not provide are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HashMap<String, String>")]
pub struct Record {
    cells: [String; Column::COUNT],
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: Column) -> &str {
        &self.cells[column.index()]
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.cells[column.index()] = value.into();
    }

    /// Iterate `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &str)> {
        Column::ALL
            .iter()
            .copied()
            .zip(self.cells.iter().map(String::as_str))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Column::COUNT))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

impl TryFrom<HashMap<String, String>> for Record {
    type Error = QuoteError;

    fn try_from(map: HashMap<String, String>) -> Result<Self, Self::Error> {
        let mut record = Record::new();
        let mut seen = [false; Column::COUNT];
        for (key, value) in map {
            let column = Column::parse(&key)?;
            // "State" and "state" name the same column
            if std::mem::replace(&mut seen[column.index()], true) {
                return Err(QuoteError::DuplicateColumn(column.name().to_string()));
            }
            record.set(column, value);
        }
        Ok(record)
    }
}

/// All records extracted from one PDF, in page order then row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    records: Vec<Record>,
}

impl Document {
    pub fn new(records: Vec<Record>) -> Self {
        Document { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records matching `filter`, in original order.
    ///
    /// `None` is the cleared filter and yields the whole document.
    pub fn filter(&self, filter: Option<&Filter>) -> Document {
        match filter {
            None => self.clone(),
            Some(f) => Document {
                records: self
                    .records
                    .iter()
                    .filter(|r| f.matches(r))
                    .cloned()
                    .collect(),
            },
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

use crate::model::Record;
use crate::schema::Column;

/// Maps cell positions in a table row to columns.
///
/// A header row binds each position to the column its text names. Until a
/// header has been seen, positions map onto the fixed column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    slots: Vec<Option<Column>>,
}

impl ColumnBinding {
    pub fn positional() -> Self {
        ColumnBinding {
            slots: Column::ALL.iter().copied().map(Some).collect(),
        }
    }

    pub fn slots(&self) -> &[Option<Column>] {
        &self.slots
    }

    /// Place `cells` into a record. Cells at unbound positions or past the
    /// last slot are dropped; columns nothing maps to stay empty.
    pub fn bind(&self, cells: &[&str]) -> Record {
        let mut record = Record::new();
        for (slot, cell) in self.slots.iter().zip(cells) {
            if let Some(column) = slot {
                if !cell.is_empty() {
                    record.set(*column, *cell);
                }
            }
        }
        record
    }
}

impl Default for ColumnBinding {
    fn default() -> Self {
        Self::positional()
    }
}

/// Recognize a header row.
///
/// A row is a header when it has at least two non-empty cells and every one
/// of them is a column name (exact text, case-insensitive).
pub fn recognize(cells: &[&str]) -> Option<ColumnBinding> {
    let mut named = 0;
    let mut slots = Vec::with_capacity(cells.len());

    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            slots.push(None);
            continue;
        }
        let column = Column::from_name(cell)?;
        slots.push(Some(column));
        named += 1;
    }

    if named >= 2 {
        Some(ColumnBinding { slots })
    } else {
        None
    }
}

pub fn is_header(cells: &[&str]) -> bool {
    recognize(cells).is_some()
}

use smallvec::SmallVec;

use crate::data::{Data, Value};

/// A single table cell: the text shown to the user and, optionally, an
/// explicit value to sort by instead of that text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    text: String,
    sort_value: Option<Value>
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            sort_value: None
        }
    }

    pub fn with_sort_value(mut self, value: impl Into<Value>) -> Self {
        self.sort_value = Some(value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sort_value(&self) -> Option<Data<'_>> {
        self.sort_value.as_ref().map(Value::as_data)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

/// An opaque sequence of cells. Rows may be shorter than the table is
/// wide, e.g. a placeholder row spanning every column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: SmallVec<[Cell; 8]>
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn push(&mut self, cell: impl Into<Cell>) {
        self.cells.push(cell.into());
    }

    pub fn with(mut self, cell: impl Into<Cell>) -> Self {
        self.push(cell);
        self
    }

    pub fn get_col(&self, idx: usize) -> Option<&Cell> {
        self.cells.get(idx)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

impl<C: Into<Cell>> FromIterator<C> for Row {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        Row {
            cells: iter.into_iter().map(Into::into).collect()
        }
    }
}

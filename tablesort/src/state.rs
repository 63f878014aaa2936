use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::column::ColumnSpec;
use crate::indicator::{self, HeaderStates};

#[repr(i8)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    Descending = -1,
    #[default]
    Unsorted = 0,
    Ascending = 1
}

impl Direction {
    /// Next step of the per-column cycle `1 -> -1 -> 0 -> 1`.
    pub fn next(self) -> Direction {
        match self {
            Direction::Unsorted => Direction::Ascending,
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Unsorted
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
            Direction::Unsorted => Ordering::Equal
        }
    }
}

/// Sort state of one registered table.
#[derive(Clone, Debug)]
pub struct SortState {
    active_column: Option<usize>,
    direction: Direction,
    columns: BTreeMap<usize, ColumnSpec>,
    original_order: Arc<[usize]>
}

impl SortState {
    pub(crate) fn new(columns: BTreeMap<usize, ColumnSpec>, rows: usize) -> SortState {
        SortState {
            active_column: None,
            direction: Direction::Unsorted,
            columns,
            original_order: (0..rows).collect()
        }
    }

    pub fn active_column(&self) -> Option<usize> {
        self.active_column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn columns(&self) -> &BTreeMap<usize, ColumnSpec> {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&ColumnSpec> {
        self.columns.get(&idx)
    }

    /// Row order captured at registration.
    pub fn original_order(&self) -> &[usize] {
        &self.original_order
    }

    pub fn header_states(&self) -> HeaderStates {
        indicator::project(self.active_column, self.direction, self.columns.keys().copied())
    }

    pub(crate) fn advance(&mut self, column: usize) -> Direction {
        if self.active_column != Some(column) {
            self.active_column = Some(column);
            self.direction = Direction::Ascending;
        } else {
            self.direction = self.direction.next();
        }
        self.direction
    }

    pub(crate) fn clear(&mut self) {
        self.active_column = None;
        self.direction = Direction::Unsorted;
    }
}

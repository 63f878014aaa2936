use std::collections::BTreeMap;
use std::sync::Arc;

use log::trace;

use crate::coerce::{coerce, Comparable};
use crate::column::ColumnSpec;
use crate::compare::compare;
use crate::data::Data;
use crate::identity::{RowIdExtractor, RowIdentity};
use crate::indicator::HeaderStates;
use crate::row::Row;
use crate::state::{Direction, SortState};

/// Result of a sort request: the rows in their new order and the
/// indicator to show on every sortable header.
#[derive(Debug)]
pub struct SortOutcome<'t> {
    pub rows: Vec<&'t Row>,
    pub header_states: HeaderStates
}

/// A registered table: its rows, their current order and sort state.
#[derive(Clone, Debug)]
pub struct TableView {
    rows: Arc<[Row]>,
    order: Vec<usize>,
    identities: Vec<RowIdentity>,
    state: SortState
}

impl TableView {
    pub fn new(rows: Vec<Row>, columns: impl IntoIterator<Item = ColumnSpec>, row_id: Option<RowIdExtractor>) -> TableView {
        let identities = rows.iter()
            .enumerate()
            .map(|(idx, row)| RowIdentity::resolve(row, idx, row_id.as_ref()))
            .collect();
        let columns: BTreeMap<usize, ColumnSpec> = columns.into_iter()
            .map(|spec| (spec.index, spec))
            .collect();

        TableView {
            order: (0..rows.len()).collect(),
            state: SortState::new(columns, rows.len()),
            rows: rows.into(),
            identities
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Row at `idx` in the current order.
    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.order.get(idx).map(|&row_idx| &self.rows[row_idx])
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.order.iter().map(|&row_idx| &self.rows[row_idx])
    }

    /// Current order as registration indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn state(&self) -> &SortState {
        &self.state
    }

    pub fn header_states(&self) -> HeaderStates {
        self.state.header_states()
    }

    /// Back to the state right after registration.
    pub fn reset(&mut self) {
        self.state.clear();
        self.order = self.state.original_order().to_vec();
    }

    /// Handles a header click on `column`. Returns `None`, leaving the
    /// table untouched, when the column is not declared or fewer than two
    /// rows have a cell in it.
    pub fn sort_by(&mut self, column: usize) -> Option<SortOutcome<'_>> {
        let Some(spec) = self.state.column(column).cloned() else {
            trace!("column {column} is not sortable");
            return None;
        };

        let (sortable, unsortable): (Vec<usize>, Vec<usize>) = self.order.iter()
            .copied()
            .partition(|&row_idx| self.rows[row_idx].get_col(column).is_some());
        if sortable.len() < 2 {
            trace!("column {column} has {} sortable rows, nothing to do", sortable.len());
            return None;
        }

        let direction = self.state.advance(column);
        self.order = match direction {
            Direction::Unsorted => self.state.original_order().to_vec(),
            Direction::Ascending | Direction::Descending => {
                let rows = &self.rows;
                let identities = &self.identities;

                let mut keyed: Vec<(usize, Comparable)> = sortable.into_iter()
                    .map(|row_idx| {
                        let data = rows[row_idx].get_col(column).map_or(Data::Null, |cell| spec.raw_value(cell));
                        (row_idx, coerce(data, spec.ty))
                    })
                    .collect();
                keyed.sort_by(|(a_idx, a), (b_idx, b)| {
                    let ordering = compare(a, b).then_with(|| identities[*a_idx].cmp(&identities[*b_idx]));
                    direction.apply(ordering)
                });

                keyed.into_iter()
                    .map(|(row_idx, _)| row_idx)
                    .chain(unsortable)
                    .collect()
            }
        };

        Some(SortOutcome {
            rows: self.rows().collect(),
            header_states: self.state.header_states()
        })
    }
}

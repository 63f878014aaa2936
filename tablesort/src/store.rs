use std::collections::HashMap;

use log::{debug, trace};

use crate::column::ColumnSpec;
use crate::identity::RowIdExtractor;
use crate::indicator::HeaderStates;
use crate::row::Row;
use crate::state::SortState;
use crate::view::{SortOutcome, TableView};

/// Sort state for every table a view manages, keyed by table id.
///
/// Entries are only ever replaced wholesale by [`SortStateStore::register`];
/// sort requests update the active column, direction and row order of an
/// existing entry. Requests that cannot be served are silent no-ops.
#[derive(Debug, Default)]
pub struct SortStateStore {
    tables: HashMap<String, TableView>
}

impl SortStateStore {
    pub fn new() -> Self {
        SortStateStore::default()
    }

    /// Registers (or re-registers) a table. Must be called whenever the
    /// table's row set is replaced; it captures the new original order and
    /// clears any active sort.
    pub fn register(&mut self, table_id: impl Into<String>, rows: Vec<Row>, columns: impl IntoIterator<Item = ColumnSpec>, row_id: Option<RowIdExtractor>) {
        let table_id = table_id.into();
        let view = TableView::new(rows, columns, row_id);
        debug!("registered table `{}`: {} rows, {} sortable columns", table_id, view.len(), view.state().columns().len());
        self.tables.insert(table_id, view);
    }

    /// Clears the active sort and restores registration order.
    pub fn reset(&mut self, table_id: &str) -> bool {
        if let Some(view) = self.tables.get_mut(table_id) {
            view.reset();
            debug!("reset table `{table_id}`");
            true
        } else {
            false
        }
    }

    pub fn request_sort(&mut self, table_id: &str, column: usize) -> Option<SortOutcome<'_>> {
        let Some(view) = self.tables.get_mut(table_id) else {
            trace!("sort requested for unregistered table `{table_id}`");
            return None;
        };
        if view.is_empty() {
            trace!("sort requested for empty table `{table_id}`");
            return None;
        }

        let outcome = view.sort_by(column)?;
        debug!(
            "sorted table `{table_id}` by column {column}: {:?}",
            outcome.header_states.get(&column)
        );
        Some(outcome)
    }

    /// Entry point for header clicks, where the column index arrives as
    /// text. Anything that is not a column index is ignored.
    pub fn handle_header_click(&mut self, table_id: &str, column: &str) -> Option<SortOutcome<'_>> {
        match column.trim().parse::<usize>() {
            Ok(column) => self.request_sort(table_id, column),
            Err(_) => {
                trace!("ignoring header click on `{table_id}` with column `{column}`");
                None
            }
        }
    }

    pub fn table(&self, table_id: &str) -> Option<&TableView> {
        self.tables.get(table_id)
    }

    pub fn state(&self, table_id: &str) -> Option<&SortState> {
        self.table(table_id).map(TableView::state)
    }

    pub fn rows(&self, table_id: &str) -> Option<impl Iterator<Item = &Row>> {
        self.table(table_id).map(TableView::rows)
    }

    pub fn header_states(&self, table_id: &str) -> Option<HeaderStates> {
        self.table(table_id).map(TableView::header_states)
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.tables.contains_key(table_id)
    }
}

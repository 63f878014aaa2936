use egui::Ui;
use log::debug;

use table_catalog::Catalog;
use tablesort::Row;

use crate::DataShared;

/// Case-insensitive substring filter over one column or all of them.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RowFilter {
    pub query: String,
    pub column: Option<usize>
}

impl RowFilter {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let contains = |text: &str| text.to_lowercase().contains(&query);
        match self.column {
            Some(idx) => row.get_col(idx).is_some_and(|cell| contains(cell.text())),
            None => row.iter().any(|cell| contains(cell.text()))
        }
    }

    pub fn apply<'r>(&self, rows: impl IntoIterator<Item = &'r Row>) -> Vec<Row> {
        rows.into_iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect()
    }
}

pub struct FilterTab {
    filter: RowFilter
}

impl FilterTab {
    pub fn new(_cc: &eframe::CreationContext) -> FilterTab {
        FilterTab {
            filter: RowFilter::default()
        }
    }

    pub fn show(&mut self, ui: &mut Ui, catalog: &Catalog, shared: &mut Option<DataShared>) {
        let Some(shared) = shared else {
            ui.label("Import a table first.");
            return;
        };

        if self.filter.column.is_some_and(|idx| idx >= shared.layout.columns.len()) {
            self.filter.column = None;
        }

        let column_name = |idx: Option<usize>| {
            idx.and_then(|idx| shared.layout.column(idx)).map_or("<all columns>", |(title, _)| title)
        };
        egui::ComboBox::new("filter-column-combo", "Column")
            .selected_text(column_name(self.filter.column))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.filter.column, None, "<all columns>");
                for (idx, title) in shared.layout.headers().enumerate() {
                    ui.selectable_value(&mut self.filter.column, Some(idx), title);
                }
            });

        ui.horizontal(|ui| {
            ui.label("Contains:");
            ui.text_edit_singleline(&mut self.filter.query);
        });

        if self.filter != shared.filter {
            let rows = self.filter.apply(shared.complete_rows.iter());
            debug!("filter {:?} keeps {} of {} rows", self.filter, rows.len(), shared.complete_rows.len());
            shared.show_rows(catalog, self.filter.clone(), rows);
        }

        ui.add_space(3.0);

        ui.horizontal(|ui| {
            if ui.add_enabled(!self.filter.is_empty(), egui::Button::new("Clear Filter")).clicked() {
                self.filter.query.clear();
            }

            let sorted = shared.store.state(&shared.table_id).is_some_and(|state| state.active_column().is_some());
            if ui.add_enabled(sorted, egui::Button::new("Original Order")).clicked() {
                shared.store.reset(&shared.table_id);
            }
        });

        ui.label(format!("{} of {} rows shown", shared.shown_rows(), shared.complete_rows.len()));
    }
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod file_picker;
mod filter;
mod import;

use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use egui::{Align, Align2, Context, Direction, Layout, panel::Side, RichText, Visuals};
use eframe::{Frame, Storage};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use log::error;
use table_catalog::{Catalog, TableLayout};
use tablesort::{HeaderState, Row, SortStateStore};

use crate::filter::{FilterTab, RowFilter};
use crate::import::ImportTab;


#[derive(Copy, Clone, PartialEq, Eq)]
enum LeftState {
    Import,
    Filter
}

/// The imported table. `complete_rows` holds every record as loaded; the
/// store holds the rows passing `filter`, in their current sort order.
struct DataShared {
    table_id: String,
    layout: TableLayout,
    complete_rows: Arc<[Row]>,
    filter: RowFilter,
    store: SortStateStore
}

impl DataShared {
    fn new(catalog: &Catalog, table_id: String, layout: TableLayout, rows: Vec<Row>) -> DataShared {
        let mut store = SortStateStore::new();
        catalog.refresh(&mut store, &table_id, rows.clone());

        DataShared {
            table_id,
            layout,
            complete_rows: rows.into(),
            filter: RowFilter::default(),
            store
        }
    }

    fn shown_rows(&self) -> usize {
        self.store.table(&self.table_id).map_or(0, |view| view.len())
    }

    /// Replaces the shown rows. Any active sort is dropped.
    fn show_rows(&mut self, catalog: &Catalog, filter: RowFilter, rows: Vec<Row>) {
        self.filter = filter;
        catalog.refresh(&mut self.store, &self.table_id, rows);
    }
}

struct App {
    left_state: LeftState,
    import_tab: ImportTab,
    filter_tab: FilterTab,

    catalog: Catalog,
    shared: Option<DataShared>,

    is_maximized: bool
}

impl App {
    fn new(cc: &eframe::CreationContext, catalog: Catalog) -> App {
        let was_maximized = cc.storage.and_then(|store| store.get_string("was-maximized")).map_or(false, |s| s == "true");
        if was_maximized {
            cc.egui_ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(true));
        }

        App {
            left_state: LeftState::Import,
            import_tab: ImportTab::new(cc, &catalog),
            filter_tab: FilterTab::new(cc),

            catalog,
            shared: None,

            is_maximized: was_maximized
        }
    }
}

fn toast(kind: ToastKind, text: impl Into<String>) -> Toast {
    let text: String = text.into();
    Toast {
        text: text.into(),
        kind,
        options: ToastOptions::default()
            .duration_in_seconds(5.0)
            .show_progress(true),
        ..Default::default()
    }
}

fn indicator(state: HeaderState) -> &'static str {
    match state {
        HeaderState::Ascending => "▲",
        HeaderState::Descending => "▼",
        HeaderState::Neutral => "⇅"
    }
}

fn show_table(ui: &mut egui::Ui, shared: &mut DataShared) {
    let Some(view) = shared.store.table(&shared.table_id) else {
        return;
    };
    let header_states = view.header_states();
    let num_cols = shared.layout.columns.len();
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.heading(&shared.layout.title);
        ui.label(format!("{} of {} rows", view.len(), shared.complete_rows.len()));
    });
    ui.separator();

    egui::ScrollArea::horizontal().show(ui, |ui| {
        egui_extras::TableBuilder::new(ui)
            .auto_shrink([false, false])
            .max_scroll_height(f32::INFINITY)
            .resizable(true)
            .striped(true)
            .columns(egui_extras::Column::auto().clip(true), num_cols)
            .cell_layout(Layout::left_to_right(Align::Center))
            .header(28.0, |mut row| {
                for (idx, title) in shared.layout.headers().enumerate() {
                    row.col(|ui| {
                        if let Some(state) = header_states.get(&idx) {
                            let text = RichText::new(format!("{title} {}", indicator(*state))).strong().size(15.0);
                            if ui.add(egui::Button::new(text).frame(false)).clicked() {
                                clicked = Some(idx);
                            }
                        } else {
                            ui.add(egui::Label::new(RichText::new(title).strong().size(15.0)).truncate());
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(24.0, view.len(), |mut row| {
                    let Some(data_row) = view.row(row.index()) else {
                        return;
                    };
                    for idx in 0..num_cols {
                        row.col(|ui| {
                            let text = data_row.get_col(idx).map_or("", tablesort::Cell::text);
                            ui.add(egui::Label::new(RichText::new(text).size(14.0)).truncate());
                        });
                    }
                });
            });
    });

    if let Some(column) = clicked {
        shared.store.request_sort(&shared.table_id, column);
    }
}


impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        self.is_maximized = ctx.input(|state| state.viewport().maximized.unwrap_or(false));

        let mut toasts = Toasts::new()
            .anchor(Align2::LEFT_BOTTOM, (5.0, -5.0))
            .direction(Direction::BottomUp);

        ctx.set_visuals(Visuals::light());

        egui::SidePanel::new(Side::Left, "left-panel")
            .min_width(240.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                ui.add_space(3.0);
                ui.columns(2, |columns| {
                    columns[0].vertical_centered_justified(|ui| {
                        ui.selectable_value(&mut self.left_state, LeftState::Import, "Import")
                    });
                    columns[1].vertical_centered_justified(|ui| {
                        ui.add_enabled_ui(self.shared.is_some(), |ui| {
                            ui.selectable_value(&mut self.left_state, LeftState::Filter, "Filter")
                        });
                    });
                });
                ui.separator();

                match self.left_state {
                    LeftState::Import => {
                        self.import_tab.show(ui, &self.catalog, &mut self.shared, &mut toasts);
                    }
                    LeftState::Filter => {
                        self.filter_tab.show(ui, &self.catalog, &mut self.shared);
                    }
                };
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(shared) = &mut self.shared {
                show_table(ui, shared);
            } else {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Label::new(RichText::new("No Data").size(40.0)));
                });
            }
        });

        toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn Storage) {
        storage.set_string("was-maximized", self.is_maximized.to_string());

        self.import_tab.save(storage);
    }

    fn persist_egui_memory(&self) -> bool { false }
}

/// Stage label and completed fraction of a background task.
#[derive(Default)]
struct ProgressState {
    fraction: AtomicU32,
    stage: Mutex<String>
}

impl ProgressState {
    fn fraction(&self) -> f32 {
        f32::from_bits(self.fraction.load(Ordering::Relaxed))
    }

    fn stage(&self) -> String {
        self.stage.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

/// Handle a background task uses to report its progress. Updates smaller
/// than a percent are dropped so the UI is not repainted for every chunk.
struct Progress {
    ctx: Context,
    state: Arc<ProgressState>
}

impl Progress {
    fn stage(&self, stage: impl Into<String>) {
        *self.state.stage.lock().unwrap_or_else(PoisonError::into_inner) = stage.into();
        self.ctx.request_repaint_after(Duration::from_millis(16));
    }

    fn set(&self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        if (fraction * 100.0).floor() > (self.state.fraction() * 100.0).floor() {
            self.state.fraction.store(fraction.to_bits(), Ordering::Relaxed);
            self.ctx.request_repaint_after(Duration::from_millis(16));
        }
    }

    /// Maps `done / total` of one stage into the `[from, to]` share of the bar.
    fn set_span(&self, from: f32, to: f32, done: u64, total: u64) {
        let part = if total == 0 { 1.0 } else { done as f32 / total as f32 };
        self.set(from + (to - from) * part.min(1.0));
    }
}

/// Work running on a background thread that reports progress back to the UI.
struct ProgressTask<T> {
    handle: JoinHandle<T>,
    state: Arc<ProgressState>
}

impl<T: Send + 'static> ProgressTask<T> {
    fn spawn(ctx: &Context, work: impl FnOnce(&Progress) -> T + Send + 'static) -> ProgressTask<T> {
        let state = Arc::new(ProgressState::default());
        let progress = Progress { ctx: ctx.clone(), state: state.clone() };

        let handle = std::thread::spawn(move || {
            let res = work(&progress);
            progress.ctx.request_repaint();
            res
        });

        ProgressTask { handle, state }
    }

    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// `None` if the task panicked.
    fn join(self) -> Option<T> {
        self.handle.join().ok()
    }

    fn fraction(&self) -> f32 {
        self.state.fraction()
    }

    fn stage(&self) -> String {
        self.state.stage()
    }
}


fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalog = match Catalog::load() {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("could not load table catalog: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        centered: true,
        ..Default::default()
    };
    eframe::run_native("Ledger Desk", options, Box::new(|cc| Ok(Box::new(App::new(cc, catalog)))))
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;

use egui::{Color32, Ui};
use eframe::Storage;
use egui_toast::{ToastKind, Toasts};
use log::{error, info};

use table_catalog::Catalog;
use tablesort::Row;

use crate::{toast, DataShared, Progress, ProgressTask};

pub struct ImportTab {
    table_id: String,
    /// Last file loaded into each table.
    source_paths: BTreeMap<String, String>,

    loading: Option<ProgressTask<Result<Vec<Row>, String>>>,
    loading_table: String,
    loading_message: Option<String>
}

impl ImportTab {
    pub fn new(cc: &eframe::CreationContext, catalog: &Catalog) -> ImportTab {
        let source_paths = cc.storage.and_then(|storage| {
            let stored = storage.get_string("import-source-paths")?;
            ron::from_str::<'_, BTreeMap<String, String>>(&stored).ok()
        }).unwrap_or_default();
        let table_id = cc.storage
            .and_then(|storage| storage.get_string("import-table"))
            .filter(|id| catalog.get(id).is_some())
            .or_else(|| catalog.tables().next().map(|(id, _)| id.to_owned()))
            .unwrap_or_default();

        ImportTab {
            table_id,
            source_paths,

            loading: None,
            loading_table: String::new(),
            loading_message: None
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match ron::to_string(&self.source_paths) {
            Ok(paths) => storage.set_string("import-source-paths", paths),
            Err(e) => error!("could not store import paths: {e}")
        }
        storage.set_string("import-table", self.table_id.clone());
    }

    pub fn show(&mut self, ui: &mut Ui, catalog: &Catalog, shared: &mut Option<DataShared>, toasts: &mut Toasts) {
        let selected_title = catalog.get(&self.table_id).map_or("<none>", |layout| layout.title.as_str());
        egui::ComboBox::new("import-table-combo", "Table")
            .selected_text(selected_title)
            .show_ui(ui, |ui| {
                for (id, layout) in catalog.tables() {
                    ui.selectable_value(&mut self.table_id, id.to_owned(), &layout.title);
                }
            });

        egui::CollapsingHeader::new("Records File").id_salt("records-file-header").default_open(true).show(ui, |ui| {
            let path = self.source_paths.entry(self.table_id.clone()).or_default();
            ui.add(crate::file_picker::FilePicker::new("records-file-picker", path)
                .dialog_title("Records File")
                .add_filter("JSON", &["json"])
            );
        });

        ui.add_space(3.0);

        if let Some(task) = self.loading.take_if(|task| task.is_finished()) {
            let result = task.join().unwrap_or_else(|| Err("loader stopped unexpectedly".to_string()));
            self.finish_loading(result, catalog, shared, toasts);
        }

        ui.horizontal(|ui| {
            if let Some(task) = &self.loading {
                ui.add_enabled(false, egui::Button::new("Loading"));
                ui.add(egui::ProgressBar::new(task.fraction()).text(task.stage()));
            } else {
                let source_path = self.source_paths.get(&self.table_id).filter(|path| !path.is_empty());
                let response = ui.add_enabled(source_path.is_some(), egui::Button::new("Load Data"))
                    .on_disabled_hover_text("Choose a records file.");

                if let (true, Some(source_path)) = (response.clicked(), source_path) {
                    self.loading_message = None;
                    self.loading_table = self.table_id.clone();

                    let catalog = catalog.clone();
                    let table_id = self.table_id.clone();
                    let source_path = source_path.clone();

                    self.loading = Some(ProgressTask::spawn(ui.ctx(), move |progress| {
                        let json = read_records_file(&source_path, progress)
                            .map_err(|e| format!("Could not read {source_path}: {e}"))?;

                        progress.stage("Converting records");
                        let rows = catalog.load_records(&table_id, &json).map_err(|e| e.to_string())?;
                        progress.set(1.0);
                        Ok(rows)
                    }));
                }
            }

            if let Some(msg) = &self.loading_message {
                ui.colored_label(Color32::RED, "!").on_hover_text(msg);
            }
        });
    }

    fn finish_loading(&mut self, result: Result<Vec<Row>, String>, catalog: &Catalog, shared: &mut Option<DataShared>, toasts: &mut Toasts) {
        let table_id = std::mem::take(&mut self.loading_table);
        let Some(layout) = catalog.get(&table_id) else {
            return;
        };

        match result {
            Ok(rows) => {
                info!("loaded {} rows into `{table_id}`", rows.len());
                toasts.add(toast(ToastKind::Success, format!("Loaded {} rows into {}.", rows.len(), layout.title)));
                shared.replace(DataShared::new(catalog, table_id, layout.clone(), rows));
            }
            Err(msg) => {
                error!("could not load `{table_id}`: {msg}");
                toasts.add(toast(ToastKind::Error, format!("Could not load {}.", layout.title)));
                self.loading_message = Some(msg);
            }
        }
    }
}

const READ_CHUNK: usize = 64 * 1024;

/// Reads the whole file, reporting the first 80% of the bar as bytes arrive.
fn read_records_file(path: &str, progress: &Progress) -> std::io::Result<String> {
    progress.stage("Reading file");
    let mut file = File::open(path)?;
    let total = file.metadata()?.len();

    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or_default());
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        progress.set_span(0.0, 0.8, bytes.len() as u64, total);
    }

    String::from_utf8(bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use egui::{Response, Ui};
use futures_lite::future::block_on;
use rfd::AsyncFileDialog;

type DialogHandle = Option<JoinHandle<Option<PathBuf>>>;

/// Path field with a native "open file" dialog. The dialog runs on its own
/// thread; its result is picked up on a later frame.
pub struct FilePicker<'a> {
    id_source: egui::Id,
    dialog: AsyncFileDialog,
    path: &'a mut String
}

impl<'a> FilePicker<'a> {
    pub fn new(id: impl Into<egui::Id>, path: &'a mut String) -> Self {
        FilePicker {
            id_source: id.into(),
            dialog: AsyncFileDialog::new(),
            path
        }
    }

    pub fn dialog_title(mut self, title: impl Into<String>) -> Self {
        self.dialog = self.dialog.set_title(title);
        self
    }

    pub fn add_filter(mut self, name: impl Into<String>, extensions: &[impl ToString]) -> Self {
        self.dialog = self.dialog.add_filter(name, extensions);
        self
    }
}

fn open(dialog: AsyncFileDialog, current: &str, ctx: egui::Context) -> JoinHandle<Option<PathBuf>> {
    let dialog = match Path::new(current).parent().filter(|dir| dir.is_dir()) {
        Some(dir) => dialog.set_directory(dir),
        None => dialog
    };
    let pick_task = dialog.pick_file();

    thread::spawn(move || {
        let picked = block_on(pick_task).map(|handle| handle.path().to_owned());
        ctx.request_repaint_after(Duration::from_millis(100));
        picked
    })
}

impl<'a> egui::Widget for FilePicker<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let FilePicker { id_source, dialog, path } = self;
        let pending = ui.data_mut(|data|
            data.get_temp_mut_or_default::<Arc<Mutex<DialogHandle>>>(id_source).clone()
        );
        let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = pending.take_if(|handle| handle.is_finished()) {
            if let Some(picked) = handle.join().ok().flatten() {
                *path = picked.to_string_lossy().into_owned();
            }
        }

        ui.horizontal(|ui| {
            if ui.add_enabled(pending.is_none(), egui::Button::new("Choose File")).clicked() {
                *pending = Some(open(dialog, path, ui.ctx().clone()));
            }
            ui.add(egui::TextEdit::singleline(path).hint_text("..."));
        }).response
    }
}

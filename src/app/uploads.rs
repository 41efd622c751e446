//! Upload logic

use super::App;
use crate::constants::IMAGE_EXTENSIONS;
use crate::types::{SelectedFile, UploadOutcome, UploadSlot};
use eframe::egui;
use tracing::{error, info, warn};

impl App {
    /// Open the native file picker for a slot. Cancelling the picker keeps
    /// the previous selection.
    pub fn select_file(&mut self, slot: UploadSlot) {
        let mut dialog = rfd::FileDialog::new().add_filter("Images", IMAGE_EXTENSIONS);
        if let Some(dir) = &self.last_browse_dir {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.pick_file() else {
            return;
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        info!(slot = slot.label(), file = %path.display(), size, "File selected");

        self.last_browse_dir = path.parent().map(|p| p.to_path_buf());
        *self.selection_mut(slot) = Some(SelectedFile { path, name, size });
    }

    /// Submit the selected file for a slot to its backend.
    ///
    /// With no selection this is a validation alert and nothing else — no
    /// network activity, submitting flag untouched. Otherwise the flag is
    /// raised before the task spawns so the frame that handles the click
    /// already renders both buttons disabled.
    pub fn submit(&mut self, slot: UploadSlot, ctx: &egui::Context) {
        let Some(file) = self.selection(slot).cloned() else {
            warn!(slot = slot.label(), "Submit with no file selected");
            self.alert_message = Some(slot.missing_file_message());
            return;
        };

        self.upload_state.lock().unwrap().active += 1;

        info!(slot = slot.label(), file = %file.path.display(), "Upload starting");

        let state = self.upload_state.clone();
        let client = self.client.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let outcome = match std::fs::read(&file.path) {
                Err(e) => {
                    error!(slot = slot.label(), error = %e, "Failed to read file");
                    UploadOutcome::Failed {
                        slot,
                        message: format!("Failed to read file: {}", e),
                    }
                }
                Ok(bytes) => match client.upload_image(slot, &file.name, bytes).await {
                    Ok(payload) => {
                        info!(slot = slot.label(), "Upload response received");
                        UploadOutcome::Response { slot, payload }
                    }
                    Err(e) => {
                        error!(slot = slot.label(), error = %e, "Upload failed");
                        UploadOutcome::Failed {
                            slot,
                            message: e.to_string(),
                        }
                    }
                },
            };

            state.lock().unwrap().settle(outcome);
            ctx.request_repaint();
        });
    }

    /// Drain settled uploads on the UI thread. Responses overwrite the
    /// response panel in settlement order (last one wins); failures raise
    /// the alert modal and leave the panel as it was.
    pub fn poll_upload_results(&mut self) {
        let settled = {
            let mut state = self.upload_state.lock().unwrap();
            std::mem::take(&mut state.settled)
        };

        for outcome in settled {
            match outcome {
                UploadOutcome::Response { payload, .. } => {
                    self.last_response = Some(payload);
                }
                UploadOutcome::Failed { message, .. } => {
                    self.alert_message = Some(format!("Upload failed: {}", message));
                }
            }
        }
    }
}

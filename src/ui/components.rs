//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use crate::types::SelectedFile;
use crate::utils::format_bytes;
use eframe::egui;

/// Heading for the response panel, built from the payload's `backend`
/// field. The field is display-only and not enforced by any schema.
pub fn response_heading(payload: &serde_json::Value) -> String {
    let backend = payload
        .get("backend")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown");
    format!("Response from {}", backend)
}

/// Card heading ("Backend A" / "Backend B")
pub fn card_heading(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_HEADING)
                .strong()
                .color(theme::TEXT_PRIMARY),
        )
        .selectable(false),
    );
}

/// Selected-file row inside an upload card. Shows the file's name and size,
/// or a dimmed placeholder when nothing is selected yet.
pub fn file_summary_row(ui: &mut egui::Ui, selection: Option<&SelectedFile>) {
    theme::section_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            match selection {
                Some(file) => {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::IMAGE)
                                .size(16.0)
                                .color(theme::ACCENT),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(&file.name)
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_SECONDARY),
                        )
                        .truncate(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(format_bytes(file.size))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                            )
                            .selectable(false),
                        );
                    });
                }
                None => {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::IMAGE)
                                .size(16.0)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new("No file selected")
                                .size(theme::FONT_LABEL)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_heading_uses_backend_field() {
        let payload = json!({"backend": "B", "status": "ok"});
        assert_eq!(response_heading(&payload), "Response from B");
    }

    #[test]
    fn test_response_heading_tolerates_missing_or_non_string_backend() {
        assert_eq!(response_heading(&json!({"status": "ok"})), "Response from unknown");
        assert_eq!(response_heading(&json!({"backend": 7})), "Response from unknown");
    }
}

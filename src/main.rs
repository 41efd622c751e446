#![windows_subsystem = "windows"]
//! Gateway Image Uploader - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod constants;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use types::UploadSlot;
use ui::components;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "gateway-image-uploader.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gateway_image_uploader=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Gateway Image Uploader");

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Gateway Image Uploader starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(760.0, 600.0)))
        .with_min_inner_size([640.0, 480.0])
        .with_title("Gateway Image Uploader");

    // Window/taskbar icon rendered from the inline SVG logo
    {
        let (rgba, w, h) = utils::rasterize_logo_square(64);
        let icon = egui::IconData {
            rgba,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Gateway Image Uploader",
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply outcomes from settled upload tasks
        self.poll_upload_results();

        // Blocking notification (validation or upload failure)
        self.render_alert_modal(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                self.render_header(ui, ctx);
                ui.add_space(theme::SPACING_XL);

                ui.columns(2, |cols| {
                    self.render_upload_card(&mut cols[0], UploadSlot::A, ctx);
                    self.render_upload_card(&mut cols[1], UploadSlot::B, ctx);
                });

                ui.add_space(theme::SPACING_XL);
                self.render_response_panel(ui);
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
        info!("Gateway Image Uploader exiting");
    }
}

impl App {
    fn render_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.vertical_centered(|ui| {
            let texture = self.logo_texture.get_or_insert_with(|| {
                let (pixels, w, h) = utils::rasterize_logo(96);
                ctx.load_texture(
                    "logo",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                )
            });
            ui.image(egui::load::SizedTexture::new(
                texture.id(),
                egui::vec2(48.0, 48.0),
            ));

            ui.add_space(theme::SPACING_SM);
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Multi-Backend Image Upload")
                        .size(20.0)
                        .strong(),
                )
                .selectable(false),
            );
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Upload images to Backend A or Backend B")
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_MUTED),
                )
                .selectable(false),
            );
        });
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui, slot: UploadSlot, ctx: &egui::Context) {
        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            components::card_heading(ui, &format!("Backend {}", slot.label()));
            ui.add_space(theme::SPACING_MD);

            components::file_summary_row(ui, self.selection(slot));
            ui.add_space(theme::SPACING_MD);

            ui.horizontal(|ui| {
                let choose = ui.add(theme::button(format!(
                    "{}  Choose File",
                    egui_phosphor::regular::FOLDER_OPEN
                )));
                if choose.clicked() {
                    self.select_file(slot);
                }

                // Both buttons share the submitting flag: a pending upload
                // for either slot disables both.
                let submitting = self.is_submitting();
                let label = if submitting {
                    "Uploading...".to_string()
                } else {
                    format!(
                        "{}  Upload to {}",
                        egui_phosphor::regular::UPLOAD_SIMPLE,
                        slot.label()
                    )
                };
                let upload = ui.add_enabled(!submitting, theme::button_accent(label));
                if upload.clicked() {
                    self.submit(slot, ctx);
                }
                if submitting {
                    ui.spinner();
                }
            });
        });
    }

    fn render_response_panel(&mut self, ui: &mut egui::Ui) {
        let Some(payload) = &self.last_response else {
            return;
        };

        let heading = components::response_heading(payload);
        let pretty =
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());

        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());

            ui.horizontal(|ui| {
                ui.colored_label(theme::ACCENT, egui_phosphor::regular::BRACKETS_CURLY);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(heading)
                            .size(theme::FONT_HEADING)
                            .strong(),
                    )
                    .selectable(false),
                );
            });
            ui.add_space(theme::SPACING_SM);
            ui.separator();
            ui.add_space(theme::SPACING_SM);

            egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(pretty)
                            .monospace()
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY),
                    )
                    .selectable(true),
                );
            });
        });
    }

    fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert_message.clone() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("alert_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.set_max_width(320.0);

            ui.vertical_centered(|ui| {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING)
                        .size(32.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.add_space(8.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&message)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_SECONDARY),
                    )
                    .wrap(),
                );
                ui.add_space(16.0);
                let ok = ui.add(theme::button_accent(format!(
                    "{}  OK",
                    egui_phosphor::regular::CHECK
                )));
                if ok.clicked() {
                    self.alert_message = None;
                }
            });
        });

        if modal_response.should_close() {
            self.alert_message = None;
        }
    }
}

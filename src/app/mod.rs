//! App module - contains the main application state and logic

mod uploads;

use crate::api::GatewayClient;
use crate::settings::Settings;
use crate::theme;
use crate::types::{SelectedFile, UploadSlot, UploadState};
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) client: GatewayClient,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Shared with spawned upload tasks
    pub(crate) upload_state: Arc<Mutex<UploadState>>,
    // Per-slot file selections
    pub(crate) file_a: Option<SelectedFile>,
    pub(crate) file_b: Option<SelectedFile>,
    // Most recent JSON payload from either backend
    pub(crate) last_response: Option<serde_json::Value>,
    // Blocking notification (validation failure or upload failure)
    pub(crate) alert_message: Option<String>,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    // Window geometry tracking for saving on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
    // Settings carried through the session
    pub(crate) gateway_url_override: Option<String>,
    pub(crate) last_browse_dir: Option<PathBuf>,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let client = GatewayClient::new(settings.gateway_url_or_default());

        Self {
            client,
            runtime: tokio::runtime::Runtime::new().unwrap(),
            upload_state: Arc::new(Mutex::new(UploadState::default())),
            file_a: None,
            file_b: None,
            last_response: None,
            alert_message: None,
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
            gateway_url_override: settings.gateway_url,
            last_browse_dir: settings.last_browse_dir.map(PathBuf::from),
        }
    }

    pub fn selection(&self, slot: UploadSlot) -> Option<&SelectedFile> {
        match slot {
            UploadSlot::A => self.file_a.as_ref(),
            UploadSlot::B => self.file_b.as_ref(),
        }
    }

    pub fn selection_mut(&mut self, slot: UploadSlot) -> &mut Option<SelectedFile> {
        match slot {
            UploadSlot::A => &mut self.file_a,
            UploadSlot::B => &mut self.file_b,
        }
    }

    /// True while either slot has a request pending. Both submit buttons
    /// disable on this flag.
    pub fn is_submitting(&self) -> bool {
        self.upload_state.lock().unwrap().is_submitting()
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            gateway_url: self.gateway_url_override.clone(),
            last_browse_dir: self
                .last_browse_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        };
        settings.save(&self.data_dir);
    }
}

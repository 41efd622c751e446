//! User settings stored as settings.json in the app data directory

use crate::constants::GATEWAY_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Gateway base URL override
    pub gateway_url: Option<String>,

    // Directory the file picker opens in
    pub last_browse_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            gateway_url: None,
            last_browse_dir: None,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn gateway_url_or_default(&self) -> String {
        self.gateway_url
            .clone()
            .unwrap_or_else(|| GATEWAY_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let settings = Settings {
            window_x: Some(120.0),
            window_y: Some(80.0),
            window_w: Some(900.0),
            window_h: Some(640.0),
            gateway_url: Some("https://apim.example.com".to_string()),
            last_browse_dir: Some("/home/user/pictures".to_string()),
        };
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.window_w, Some(900.0));
        assert_eq!(
            loaded.gateway_url.as_deref(),
            Some("https://apim.example.com")
        );
        assert_eq!(loaded.last_browse_dir.as_deref(), Some("/home/user/pictures"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = Settings::load(dir.path());
        assert!(loaded.gateway_url.is_none());
        assert_eq!(loaded.gateway_url_or_default(), GATEWAY_BASE_URL);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();
        let loaded = Settings::load(dir.path());
        assert!(loaded.window_x.is_none());
    }
}

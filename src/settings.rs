//! Persistent settings for the entry tool
//!
//! Saves and loads user preferences (data directory, field image, export
//! directory, last team) to/from a settings.json in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::DEFAULT_FIELD_IMAGE;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/settings.json";

/// Persistent settings that survive between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory scanned for roster CSVs (data files land next to them)
    pub data_dir: String,
    /// Field diagram image path
    pub field_image: String,
    /// Directory session exports are written to
    pub export_dir: String,
    /// Roster file selected when the app last ran (empty = first found)
    pub last_team: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            field_image: DEFAULT_FIELD_IMAGE.to_string(),
            export_dir: "exports".to_string(),
            last_team: String::new(),
        }
    }
}

impl AppSettings {
    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        let path = Path::new(SETTINGS_FILE);
        if !path.exists() {
            info!("No settings.json found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", SETTINGS_FILE);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        // Ensure config directory exists
        if let Some(parent) = Path::new(SETTINGS_FILE).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(SETTINGS_FILE, json)?;
        info!("Saved settings to {}", SETTINGS_FILE);
        Ok(())
    }
}

/// Resource tracking the current settings (for change detection)
#[derive(Resource)]
pub struct CurrentSettings {
    pub settings: AppSettings,
    pub dirty: bool,
}

impl Default for CurrentSettings {
    fn default() -> Self {
        Self {
            settings: AppSettings::load(),
            dirty: false,
        }
    }
}

impl CurrentSettings {
    /// Mark settings as changed (will be saved on next update)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Save if dirty
    pub fn save_if_dirty(&mut self) {
        if self.dirty {
            if let Err(e) = self.settings.save() {
                warn!("Failed to save settings: {}", e);
            }
            self.dirty = false;
        }
    }
}

/// System to save settings when changed
pub fn save_settings_system(mut settings: ResMut<CurrentSettings>) {
    settings.save_if_dirty();
}

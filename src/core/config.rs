//! Configuration and settings module.
//!
//! Persisted application settings: the trip service base URL, the log
//! sheet palette, and the remembered window size.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::api::DEFAULT_BASE_URL;
use super::trip::DutyStatus;

/// Settings filename for persistence.
const SETTINGS_FILENAME: &str = "config.json";

/// Log sheet palette.
///
/// Status colors follow the duty-status convention: slate for off duty,
/// amber for on duty, green for driving. All values persist to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    /// Fill for OFF DUTY intervals (default: light slate)
    pub off_duty_fill: [u8; 3],
    /// Border for OFF DUTY intervals (default: slate)
    pub off_duty_border: [u8; 3],
    /// Fill for ON DUTY intervals (default: light yellow)
    pub on_duty_fill: [u8; 3],
    /// Border for ON DUTY intervals (default: amber)
    pub on_duty_border: [u8; 3],
    /// Fill for DRIVING intervals (default: light green)
    pub driving_fill: [u8; 3],
    /// Border for DRIVING intervals (default: green)
    pub driving_border: [u8; 3],
    /// Grid line color
    pub grid_line: [u8; 3],
    /// Secondary text color for hour and lane labels
    pub text_secondary: [u8; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            off_duty_fill: [241, 245, 249],
            off_duty_border: [100, 116, 139],
            on_duty_fill: [254, 249, 195],
            on_duty_border: [245, 158, 11],
            driving_fill: [220, 252, 231],
            driving_border: [34, 197, 94],
            grid_line: [203, 213, 225],
            text_secondary: [100, 116, 139],
        }
    }
}

impl ColorSettings {
    /// Convert a color array to egui Color32.
    #[inline]
    pub fn to_color32(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }

    /// Fill color for a duty status.
    pub fn duty_fill(&self, status: DutyStatus) -> Color32 {
        let color = match status {
            DutyStatus::OffDuty => self.off_duty_fill,
            DutyStatus::OnDuty => self.on_duty_fill,
            DutyStatus::Driving => self.driving_fill,
        };
        Self::to_color32(color)
    }

    /// Border color for a duty status.
    pub fn duty_border(&self, status: DutyStatus) -> Color32 {
        let color = match status {
            DutyStatus::OffDuty => self.off_duty_border,
            DutyStatus::OnDuty => self.on_duty_border,
            DutyStatus::Driving => self.driving_border,
        };
        Self::to_color32(color)
    }

    /// Grid line color as Color32.
    pub fn grid_line_color(&self) -> Color32 {
        Self::to_color32(self.grid_line)
    }

    /// Secondary text color as Color32.
    pub fn text_secondary_color(&self) -> Color32 {
        Self::to_color32(self.text_secondary)
    }
}

/// Application settings, persisted to the user config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the trip service.
    #[serde(default = "default_base_url")]
    pub api_base_url: String,

    /// Log sheet palette.
    #[serde(default)]
    pub colors: ColorSettings,

    /// Window size to restore on startup (width, height).
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            colors: ColorSettings::default(),
            window_size: None,
        }
    }
}

impl AppSettings {
    /// Get the settings file path in the user's config directory.
    fn get_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("trucklog-planner");
            path.push(SETTINGS_FILENAME);
            path
        })
    }

    /// Load settings from disk, returning defaults if loading fails.
    pub fn load() -> Self {
        Self::get_settings_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }

    /// Set the window size to restore on the next start.
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_size = Some((width, height));
    }
}

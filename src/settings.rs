//! Host-level options shared by every profile.
//!
//! Settings live beside the profile store as one TOML file. Custom actions
//! recorded here extend the assignable action namespace; their key
//! sequences are only meaningful to the host.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PadError, Result};

/// Persistable host options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether on-screen control overlays are enabled at all.
    pub enable_overlays: bool,
    /// Show overlays whenever a controller is connected, not only on demand.
    pub overlays_always_on: bool,
    /// Cursor movement multiplier for stick-driven pointer control.
    pub cursor_speed: u8,
    /// Scroll multiplier for stick-driven scrolling.
    pub scroll_speed: u8,
    /// Card flags cycled by the "Flag" action, by flag index.
    pub flags: Vec<u8>,
    /// User-defined actions: name to host key sequence.
    pub custom_actions: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_overlays: true,
            overlays_always_on: false,
            cursor_speed: 5,
            scroll_speed: 5,
            flags: vec![1, 2, 3, 4],
            custom_actions: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// The default settings file location under the platform data dir.
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or(PadError::NoDataDir)?;
        Ok(base.join("cardpad").join("settings.toml"))
    }

    /// Load settings from a file, falling back to defaults when it does not
    /// exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        toml::from_str(&fs::read_to_string(path)?)
            .map_err(|e| PadError::SettingsParse(e.to_string()))
    }

    /// Write settings to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text =
            toml::to_string_pretty(self).map_err(|e| PadError::SettingsParse(e.to_string()))?;
        info!(path = %path.display(), "Saving settings");
        fs::write(path, text)?;
        Ok(())
    }

    /// Names of the user-defined custom actions, in stored order.
    #[must_use]
    pub fn custom_action_names(&self) -> Vec<&str> {
        self.custom_actions.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.enable_overlays);
        assert_eq!(settings.cursor_speed, 5);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.scroll_speed = 9;
        settings.custom_actions.insert("Open Stats".to_string(), "Shift+S".to_string());
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.custom_action_names(), vec!["Open Stats"]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cursor_speed = 2\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.cursor_speed, 2);
        assert_eq!(settings.scroll_speed, 5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "cursor_speed = \"fast\"\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(PadError::SettingsParse(_))));
    }
}

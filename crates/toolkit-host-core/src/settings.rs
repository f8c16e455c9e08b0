// SPDX-License-Identifier: AGPL-3.0
// Toolkit Host Core - Settings persistence
//
// Host settings are stored in a local JSON file, the shell's equivalent of
// the engine's own Engine.settings. No cloud sync, just local persistence.

use crate::config::LaunchConfig;
use crate::observer::FrameTickObserver;
use crate::types::HostError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Host settings (GUI-agnostic; the toolkit owns the window)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSettings {
    /// Program name passed to the toolkit as the window title
    pub program_name: String,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Target frame rate the toolkit syncs to
    pub fps: u32,
    /// Start without presenting a visible surface
    pub hidden: bool,
    /// Explicit toolkit library path; None means the platform default name
    #[serde(default)]
    pub library_path: Option<PathBuf>,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            program_name: "ToolKit".to_string(),
            window_width: 1024,
            window_height: 768,
            fps: 120,
            hidden: false,
            library_path: None,
        }
    }
}

impl HostSettings {
    /// Convert to a launch configuration with the given frame observer.
    pub fn to_launch_config(&self, observer: Arc<dyn FrameTickObserver>) -> LaunchConfig {
        LaunchConfig::new(
            &self.program_name,
            self.window_width,
            self.window_height,
            self.fps,
            self.hidden,
            observer,
        )
    }
}

/// In-memory cache of settings, persisted to disk on changes
pub struct SettingsStore {
    settings: RwLock<HostSettings>,
    file_path: PathBuf,
}

impl SettingsStore {
    /// Create a new settings store, loading from disk if available
    pub fn new() -> Result<Self, HostError> {
        let file_path = Self::get_settings_path()?;
        tracing::info!("Settings file path: {:?}", file_path);

        let settings = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| HostError::FileIo(format!("Failed to read settings: {}", e)))?;

            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse settings, using defaults: {}", e);
                HostSettings::default()
            })
        } else {
            tracing::info!("No settings file found, using defaults");
            HostSettings::default()
        };

        let store = Self {
            settings: RwLock::new(settings),
            file_path,
        };

        // Persist default settings if file doesn't exist
        if !store.file_path.exists() {
            store.persist()?;
        }

        Ok(store)
    }

    /// Get the path to the settings file
    fn get_settings_path() -> Result<PathBuf, HostError> {
        let config_dir = directories::ProjectDirs::from("com", "toolkit", "host")
            .ok_or_else(|| HostError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();

        // Ensure the directory exists
        fs::create_dir_all(&config_dir)
            .map_err(|e| HostError::FileIo(format!("Failed to create config dir: {}", e)))?;

        Ok(config_dir.join("settings.json"))
    }

    /// Persist settings to disk
    fn persist(&self) -> Result<(), HostError> {
        let settings = self.settings.read().unwrap();

        let content = serde_json::to_string_pretty(&*settings)
            .map_err(|e| HostError::Serialization(format!("Failed to serialize settings: {}", e)))?;

        fs::write(&self.file_path, content)
            .map_err(|e| HostError::FileIo(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> HostSettings {
        self.settings.read().unwrap().clone()
    }

    /// Update settings and persist to disk
    pub fn update(&self, new_settings: HostSettings) -> Result<(), HostError> {
        {
            let mut settings = self.settings.write().unwrap();
            *settings = new_settings;
        }

        let result = self.persist();
        if let Err(e) = &result {
            tracing::error!("Failed to persist settings: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    #[test]
    fn test_default_settings_match_the_stock_host() {
        let settings = HostSettings::default();
        assert_eq!(settings.program_name, "ToolKit");
        assert_eq!(settings.window_width, 1024);
        assert_eq!(settings.window_height, 768);
        assert_eq!(settings.fps, 120);
        assert!(!settings.hidden);
        assert!(settings.library_path.is_none());
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let mut settings = HostSettings::default();
        settings.program_name = "demo".to_string();
        settings.fps = 60;
        settings.library_path = Some(PathBuf::from("/opt/toolkit/libToolKit.so"));

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: HostSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.program_name, "demo");
        assert_eq!(parsed.fps, 60);
        assert_eq!(
            parsed.library_path,
            Some(PathBuf::from("/opt/toolkit/libToolKit.so"))
        );
    }

    #[test]
    fn test_settings_use_camel_case_on_the_wire() {
        let value = serde_json::to_value(HostSettings::default()).unwrap();
        assert!(value.get("programName").is_some());
        assert!(value.get("windowWidth").is_some());
        assert!(value.get("windowHeight").is_some());
        assert!(value.get("program_name").is_none());
    }

    #[test]
    fn test_launch_config_conversion_copies_every_field() {
        let mut settings = HostSettings::default();
        settings.window_width = 640;
        settings.window_height = 480;
        settings.fps = 60;
        settings.hidden = true;

        let config = settings.to_launch_config(Arc::new(NoopObserver));
        assert_eq!(config.program_name, "ToolKit");
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.fps, 60);
        assert!(config.hidden);
    }
}

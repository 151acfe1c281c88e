//! Preferences service for Placemark.
//!
//! Manages the persisted theme preference: loading, saving, and resolving
//! the effective theme when no explicit choice was made. Preferences are
//! stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::errors::PreferencesError;
use crate::types::preferences::{PreferenceValues, ThemeMode};

/// Trait defining the preferences interface.
pub trait PreferencesTrait {
    fn load(&mut self) -> Result<PreferenceValues, PreferencesError>;
    fn save(&self) -> Result<(), PreferencesError>;
    fn theme(&self) -> Option<ThemeMode>;
    fn set_theme(&mut self, theme: ThemeMode) -> Result<(), PreferencesError>;
    /// The effective theme: the saved choice, or the system preference
    /// when nothing was saved yet.
    fn resolve_theme(&self) -> ThemeMode;
}

/// Preferences implementation that persists as JSON on disk.
pub struct Preferences {
    config_path: PathBuf,
    values: PreferenceValues,
}

impl Preferences {
    /// Creates a new `Preferences`.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform config directory with `preferences.json`.
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("placemark")
                .join("preferences.json")
        });

        Self {
            config_path,
            values: PreferenceValues::default(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Detects the system theme preference.
///
/// Without a desktop toolkit runtime we fall back to checking the
/// `GTK_THEME` environment variable; anything containing "dark" selects
/// the dark theme.
pub fn detect_system_theme() -> ThemeMode {
    if let Ok(gtk_theme) = std::env::var("GTK_THEME") {
        if gtk_theme.to_lowercase().contains("dark") {
            return ThemeMode::Dark;
        }
    }
    ThemeMode::Light
}

impl PreferencesTrait for Preferences {
    /// Loads preferences from the JSON config file.
    ///
    /// If the file does not exist, returns defaults. If the file exists
    /// but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<PreferenceValues, PreferencesError> {
        if !self.config_path.exists() {
            self.values = PreferenceValues::default();
            return Ok(self.values.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| PreferencesError::Io(format!("Failed to read config file: {}", e)))?;

        let values: PreferenceValues = serde_json::from_str(&content).map_err(|e| {
            PreferencesError::Serialization(format!("Failed to parse config file: {}", e))
        })?;

        self.values = values;
        Ok(self.values.clone())
    }

    /// Saves the current preferences to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PreferencesError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|e| {
            PreferencesError::Serialization(format!("Failed to serialize preferences: {}", e))
        })?;

        fs::write(&self.config_path, json)
            .map_err(|e| PreferencesError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn theme(&self) -> Option<ThemeMode> {
        self.values.theme
    }

    /// Updates the theme preference and persists immediately.
    fn set_theme(&mut self, theme: ThemeMode) -> Result<(), PreferencesError> {
        self.values.theme = Some(theme);
        self.save()
    }

    fn resolve_theme(&self) -> ThemeMode {
        self.values.theme.unwrap_or_else(detect_system_theme)
    }
}

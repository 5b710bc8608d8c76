//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};
use crate::export::DEFAULT_ARRAY_NAME;
use crate::models::ReselectPolicy;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Bindings file opened when none is given on the command line
    #[serde(default)]
    pub bindings_file: Option<PathBuf>,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Keyboard scale factor in the terminal (1.0 = default)
    #[serde(default = "default_keyboard_scale")]
    pub keyboard_scale: f32,
}

/// Default keyboard scale (1.0 = 100%)
fn default_keyboard_scale() -> f32 {
    1.0
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            keyboard_scale: default_keyboard_scale(),
        }
    }
}

/// Binding editor behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EditorConfig {
    /// What clicking another key does while the editor is open
    #[serde(default)]
    pub reselect: ReselectPolicy,
    /// Reject codes missing from the keycode catalogue at commit time
    #[serde(default)]
    pub validate_codes: bool,
}

/// Array export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// C identifier of the exported arrays
    #[serde(default = "default_array_name")]
    pub array_name: String,
}

fn default_array_name() -> String {
    DEFAULT_ARRAY_NAME.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            array_name: default_array_name(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/SplitBind/config.toml`
/// - macOS: `~/Library/Application Support/SplitBind/config.toml`
/// - Windows: `%APPDATA%\SplitBind\config.toml`
///
/// # Validation
///
/// - `keyboard_scale` must be within 0.5..=2.0
/// - `array_name` must be a valid C identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Binding editor behavior
    #[serde(default)]
    pub editor: EditorConfig,
    /// Array export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/SplitBind/`
    /// - macOS: `~/Library/Application Support/SplitBind/`
    /// - Windows: `%APPDATA%\SplitBind\`
    ///
    /// `SPLITBIND_CONFIG_DIR` overrides the location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the default config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from a specific file, defaulting when it doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let scale = self.ui.keyboard_scale;
        if !(0.5..=2.0).contains(&scale) {
            anyhow::bail!("ui.keyboard_scale must be between 0.5 and 2.0 (got {scale})");
        }

        if !is_c_identifier(&self.export.array_name) {
            anyhow::bail!(
                "export.array_name must be a valid C identifier (got '{}')",
                self.export.array_name
            );
        }

        Ok(())
    }

    /// Sets a value by dotted key, e.g. `editor.reselect`.
    ///
    /// The updated configuration is validated before it is accepted.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "paths.bindings_file" => {
                updated.paths.bindings_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "ui.theme_mode" => {
                updated.ui.theme_mode = match value.to_ascii_lowercase().as_str() {
                    "auto" => ThemeMode::Auto,
                    "dark" => ThemeMode::Dark,
                    "light" => ThemeMode::Light,
                    _ => anyhow::bail!("ui.theme_mode must be auto, dark or light"),
                };
            }
            "ui.keyboard_scale" => {
                updated.ui.keyboard_scale = value
                    .parse()
                    .context("ui.keyboard_scale must be a number")?;
            }
            "editor.reselect" => {
                updated.editor.reselect = match value.to_ascii_lowercase().as_str() {
                    "lastactionwins" | "last-action-wins" | "last_action_wins" => {
                        ReselectPolicy::LastActionWins
                    }
                    "keepcurrent" | "keep-current" | "keep_current" => ReselectPolicy::KeepCurrent,
                    _ => anyhow::bail!("editor.reselect must be last-action-wins or keep-current"),
                };
            }
            "editor.validate_codes" => {
                updated.editor.validate_codes = value
                    .parse()
                    .context("editor.validate_codes must be true or false")?;
            }
            "export.array_name" => {
                updated.export.array_name = value.to_string();
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

/// True for `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.bindings_file, None);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert_eq!(config.ui.keyboard_scale, 1.0);
        assert_eq!(config.editor.reselect, ReselectPolicy::LastActionWins);
        assert!(!config.editor.validate_codes);
        assert_eq!(config.export.array_name, "input_map");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.ui.keyboard_scale = 3.0;
        assert!(config.validate().is_err());

        config.ui.keyboard_scale = 1.0;
        config.export.array_name = "9lives".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.editor.reselect = ReselectPolicy::KeepCurrent;
        config.export.array_name = "left_map".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[editor]\nvalidate_codes = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.editor.validate_codes);
        assert_eq!(config.export.array_name, "input_map");
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[ui\nbroken").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::new();
        config.set_value("editor.reselect", "keep-current").unwrap();
        assert_eq!(config.editor.reselect, ReselectPolicy::KeepCurrent);

        config.set_value("ui.theme_mode", "Light").unwrap();
        assert_eq!(config.ui.theme_mode, ThemeMode::Light);

        config.set_value("paths.bindings_file", "/tmp/b.json").unwrap();
        assert_eq!(config.paths.bindings_file, Some(PathBuf::from("/tmp/b.json")));

        assert!(config.set_value("no.such_key", "1").is_err());
        assert!(config.set_value("ui.keyboard_scale", "9").is_err());
        // Rejected values leave the config untouched
        assert_eq!(config.ui.keyboard_scale, 1.0);
    }

    #[test]
    fn test_is_c_identifier() {
        assert!(is_c_identifier("input_map"));
        assert!(is_c_identifier("_x1"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("a-b"));
    }
}

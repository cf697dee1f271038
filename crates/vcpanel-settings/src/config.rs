//! Configuration and preference management for VCPanel
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into two sections:
//! - Path configuration (panel definition and image asset directories)
//! - Operator preferences (notification and shutdown behavior, jog rate)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding panel definitions.
    #[serde(default = "PathsConfig::default_panel_dir")]
    pub panel_dir: PathBuf,
    /// Directory holding image assets used for styling.
    #[serde(default = "PathsConfig::default_image_dir")]
    pub image_dir: PathBuf,
}

impl PathsConfig {
    fn default_panel_dir() -> PathBuf {
        PathBuf::from("panels")
    }

    fn default_image_dir() -> PathBuf {
        PathBuf::from("images")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            panel_dir: Self::default_panel_dir(),
            image_dir: Self::default_image_dir(),
        }
    }
}

/// Operator preferences
///
/// Both boolean preferences default to `true`: operators see desktop
/// notifications and are asked before the panel shuts the machine UI down
/// unless they opt out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether operator notifications are shown.
    #[serde(default = "Preferences::default_true")]
    pub desktop_notify: bool,
    /// Whether window close asks for confirmation.
    #[serde(default = "Preferences::default_true")]
    pub shutdown_check: bool,
    /// Initial session jog rate in machine units per minute.
    #[serde(default = "Preferences::default_jog_rate")]
    pub jog_rate: f64,
}

impl Preferences {
    fn default_true() -> bool {
        true
    }

    fn default_jog_rate() -> f64 {
        10.0
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            desktop_notify: true,
            shutdown_check: true,
            jog_rate: Self::default_jog_rate(),
        }
    }
}

/// Top-level panel configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path configuration.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Operator preferences.
    #[serde(default)]
    pub prefs: Preferences,
}

impl Config {
    /// Load a configuration from a `.json` or `.toml` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                "config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                "config file must be .json or .toml".to_string(),
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Platform configuration directory for the panel
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("vcpanel"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Default configuration file path (`<config dir>/vcpanel.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join("vcpanel.toml"))
    }

    /// Load the configuration from the default location, falling back to
    /// defaults when no file exists or it cannot be read
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "falling back to default config");
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.prefs.jog_rate < 0.0 || !self.prefs.jog_rate.is_finite() {
            return Err(SettingsError::InvalidSetting {
                key: "jog_rate".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let config = Config::default();
        assert!(config.prefs.desktop_notify);
        assert!(config.prefs.shutdown_check);
        assert_eq!(config.prefs.jog_rate, 10.0);
        assert_eq!(config.paths.panel_dir, PathBuf::from("panels"));
        assert_eq!(config.paths.image_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_toml_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vcpanel.toml");

        let mut config = Config::default();
        config.prefs.desktop_notify = false;
        config.prefs.jog_rate = 25.0;
        config.paths.image_dir = PathBuf::from("/usr/share/vcpanel/images");
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(!loaded.prefs.desktop_notify);
        assert!(loaded.prefs.shutdown_check);
        assert_eq!(loaded.prefs.jog_rate, 25.0);
        assert_eq!(loaded.paths.image_dir, PathBuf::from("/usr/share/vcpanel/images"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vcpanel.toml");
        std::fs::write(&path, "[prefs]\ndesktop_notify = false\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(!loaded.prefs.desktop_notify);
        assert!(loaded.prefs.shutdown_check);
        assert_eq!(loaded.prefs.jog_rate, 10.0);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let config = Config::default();
        let err = config.save_to_file(Path::new("config.yaml")).unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_invalid_jog_rate_rejected() {
        let mut config = Config::default();
        config.prefs.jog_rate = -5.0;
        assert!(matches!(
            config.validate().unwrap_err(),
            SettingsError::InvalidSetting { .. }
        ));
    }
}

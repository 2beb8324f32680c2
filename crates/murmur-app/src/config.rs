//! Application configuration
//!
//! Stored as YAML in the user's config directory.
//! Default location: ~/.config/murmur/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Audio capture settings
    pub audio: AudioConfig,
    /// Window and panel layout settings
    pub display: DisplayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Audio capture configuration section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Input device name; `None` uses the system default input
    pub input_device: Option<String>,
}

/// Display configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Start with both panels following playback
    pub follow_by_default: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: 900.0,
            window_height: 700.0,
            follow_by_default: true,
        }
    }
}

/// Default config path: ~/.config/murmur/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("murmur")
        .join("config.yaml")
}

/// Load configuration from a YAML file, falling back to defaults on any
/// missing or malformed file.
pub fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        log::info!("load_config: {:?} doesn't exist, using defaults", path);
        return AppConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: input device: {:?}, window: {}x{}",
                    config.audio.input_device,
                    config.display.window_width,
                    config.display.window_height
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: failed to parse config: {}, using defaults", e);
                AppConfig::default()
            }
        },
        Err(e) => {
            log::warn!("load_config: failed to read config file: {}, using defaults", e);
            AppConfig::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories.
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;
    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.audio.input_device, None);
        assert_eq!(config.display.window_width, 900.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AppConfig {
            audio: AudioConfig {
                input_device: Some("pipewire".to_string()),
            },
            display: DisplayConfig {
                window_width: 1280.0,
                window_height: 800.0,
                follow_by_default: false,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.audio.input_device.as_deref(), Some("pipewire"));
        assert_eq!(parsed.display.window_width, 1280.0);
        assert!(!parsed.display.follow_by_default);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let parsed: AppConfig = serde_yaml::from_str("audio:\n  input_device: alsa\n").unwrap();
        assert_eq!(parsed.audio.input_device.as_deref(), Some("alsa"));
        assert_eq!(parsed.display.window_height, 700.0);
    }
}

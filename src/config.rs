use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::constants;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Delay before the overlay hides after pointer activity.
    #[serde(default = "default_hide_delay")]
    pub hide_delay_ms: u64,

    /// Shorter delay used once the pointer leaves the player.
    #[serde(default = "default_pointer_leave_delay")]
    pub pointer_leave_delay_ms: u64,

    #[serde(default = "default_indicator_flash")]
    pub indicator_flash_ms: u64,

    #[serde(default = "default_end_indicator")]
    pub end_indicator_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_volume")]
    pub initial_volume: u8,

    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    #[serde(default = "default_volume_step")]
    pub volume_step: i32,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads the config at `path`, writing defaults there when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            let config = Self::from_toml_str(&contents)?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("sprocket").join("config.toml"))
    }
}

impl ControlsConfig {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn pointer_leave_delay(&self) -> Duration {
        Duration::from_millis(self.pointer_leave_delay_ms)
    }

    pub fn indicator_flash(&self) -> Duration {
        Duration::from_millis(self.indicator_flash_ms)
    }

    pub fn end_indicator(&self) -> Duration {
        Duration::from_millis(self.end_indicator_ms)
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: default_hide_delay(),
            pointer_leave_delay_ms: default_pointer_leave_delay(),
            indicator_flash_ms: default_indicator_flash(),
            end_indicator_ms: default_end_indicator(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_volume(),
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
        }
    }
}

// Default value functions
fn default_hide_delay() -> u64 { constants::CONTROLS_HIDE_DELAY_MS }
fn default_pointer_leave_delay() -> u64 { constants::POINTER_LEAVE_HIDE_DELAY_MS }
fn default_indicator_flash() -> u64 { constants::INDICATOR_FLASH_MS }
fn default_end_indicator() -> u64 { constants::END_INDICATOR_MS }
fn default_volume() -> u8 { constants::DEFAULT_VOLUME }
fn default_seek_step() -> f64 { constants::SEEK_STEP_SECS }
fn default_volume_step() -> i32 { constants::VOLUME_STEP }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.controls.hide_delay(), Duration::from_millis(3000));
        assert_eq!(config.controls.pointer_leave_delay(), Duration::from_millis(1000));
        assert_eq!(config.controls.indicator_flash(), Duration::from_millis(1000));
        assert_eq!(config.controls.end_indicator(), Duration::from_millis(2000));
        assert_eq!(config.playback.initial_volume, 100);
        assert_eq!(config.playback.volume_step, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = Config::from_toml_str(
            r#"
            [controls]
            hide_delay_ms = 5000

            [playback]
            seek_step_secs = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.controls.hide_delay_ms, 5000);
        assert_eq!(config.controls.end_indicator_ms, 2000);
        assert_eq!(config.playback.seek_step_secs, 5.0);
        assert_eq!(config.playback.initial_volume, 100);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("[controls\nhide_delay_ms = ").is_err());
    }

    #[test]
    fn test_load_from_writes_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let mut changed = config.clone();
        changed.playback.volume_step = 5;
        changed.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.playback.volume_step, 5);
    }
}

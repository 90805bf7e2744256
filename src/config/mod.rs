// SPDX-License-Identifier: MPL-2.0
//! This module handles the toaster configuration, including loading and saving
//! it to a `toaster.toml` file.
//!
//! # Configuration Sections
//!
//! - `[toast]` - Auto-dismiss delay, auto-dismiss switch, resting offset
//! - `[gesture]` - Long-press duration
//! - `[theme]` - Accent colour overrides keyed by toast type (`"success" = "#22AA55"`)
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOASTER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toaster::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.toast.delay_ms = Some(3000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
mod long_press;

pub use defaults::*;
pub use long_press::LongPressDuration;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "toaster.toml";
const APP_NAME: &str = "Toaster";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOASTER_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Defaults applied to every request that does not override them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastConfig {
    /// Auto-dismiss delay in milliseconds.
    #[serde(default = "default_delay_ms", skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,

    /// Whether toasts hide themselves after `delay_ms`.
    #[serde(
        default = "default_auto_dismiss",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_dismiss: Option<bool>,

    /// Resting offset from the top edge, in pixels.
    #[serde(default = "default_top_offset", skip_serializing_if = "Option::is_none")]
    pub top_offset: Option<f32>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            auto_dismiss: default_auto_dismiss(),
            top_offset: default_top_offset(),
        }
    }
}

/// Gesture recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    /// How long a pointer must stay down before it counts as a long press.
    #[serde(
        default = "default_long_press_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub long_press_duration_ms: Option<u64>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_duration_ms: default_long_press_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Toaster configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub gesture: GestureConfig,

    /// Hex colour overrides keyed by lowercase toast type name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub theme: BTreeMap<String, String>,
}

impl Config {
    /// Effective auto-dismiss delay, capped at [`MAX_DELAY_MS`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        let ms = self
            .toast
            .delay_ms
            .unwrap_or(DEFAULT_DELAY_MS)
            .min(MAX_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn auto_dismiss(&self) -> bool {
        self.toast.auto_dismiss.unwrap_or(DEFAULT_AUTO_DISMISS)
    }

    #[must_use]
    pub fn top_offset(&self) -> f32 {
        self.toast.top_offset.unwrap_or(DEFAULT_TOP_OFFSET)
    }

    #[must_use]
    pub fn long_press_duration(&self) -> LongPressDuration {
        self.gesture
            .long_press_duration_ms
            .map_or_else(LongPressDuration::default, LongPressDuration::new)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_delay_ms() -> Option<u64> {
    Some(DEFAULT_DELAY_MS)
}

fn default_auto_dismiss() -> Option<bool> {
    Some(DEFAULT_AUTO_DISMISS)
}

fn default_top_offset() -> Option<f32> {
    Some(DEFAULT_TOP_OFFSET)
}

fn default_long_press_ms() -> Option<u64> {
    Some(DEFAULT_LONG_PRESS_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!("Failed to load config from {:?}: {}", path, err);
                    return (Config::default(), Some(err.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_sections() {
        let mut config = Config::default();
        config.toast.delay_ms = Some(1200);
        config.toast.auto_dismiss = Some(false);
        config.gesture.long_press_duration_ms = Some(800);
        config
            .theme
            .insert("success".to_string(), "#22AA55".to_string());

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("toaster.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_rejects_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toaster.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let err = load_from_path(&config_path).expect_err("invalid toml must not load");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("toaster.toml");
        fs::write(&config_path, "[toast]\ndelay_ms = 250\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("partial config should load");
        assert_eq!(loaded.delay(), Duration::from_millis(250));
        assert!(loaded.auto_dismiss());
        assert_eq!(loaded.top_offset(), DEFAULT_TOP_OFFSET);
        assert_eq!(loaded.long_press_duration(), LongPressDuration::default());
    }

    #[test]
    fn default_config_matches_constants() {
        let config = Config::default();
        assert_eq!(config.delay(), Duration::from_millis(DEFAULT_DELAY_MS));
        assert_eq!(config.auto_dismiss(), DEFAULT_AUTO_DISMISS);
        assert_eq!(config.top_offset(), DEFAULT_TOP_OFFSET);
        assert!(config.theme.is_empty());
    }

    #[test]
    fn delay_is_capped() {
        let mut config = Config::default();
        config.toast.delay_ms = Some(MAX_DELAY_MS * 10);
        assert_eq!(config.delay(), Duration::from_millis(MAX_DELAY_MS));
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("toaster.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }
}

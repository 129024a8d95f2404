//! Configuration management for player-overlay
//!
//! This module handles loading the controller configuration from config
//! files and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::display::FullscreenApi;
use crate::utils::error::{IntoOverlayError, OverlayError, Result};

/// Longest accepted overlay fade delay
const MAX_FADE_MS: u64 = 10_000;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Controller behavior
    pub player: PlayerConfig,

    /// Fullscreen entry points
    pub fullscreen: FullscreenConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Controller behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Mute and request playback as soon as the controller binds
    pub autoplay_muted: bool,

    /// Hide the media element's own controls
    pub hide_native_controls: bool,

    /// Delay between fading the unmute overlay and removing it
    pub overlay_fade_ms: u64,
}

/// Fullscreen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    /// Entry points tried in order until one is supported
    pub entry_points: Vec<FullscreenApi>,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_muted: true,
            hide_native_controls: true,
            overlay_fade_ms: 300,
        }
    }
}

impl PlayerConfig {
    /// Overlay fade delay as a `Duration`
    pub fn overlay_fade(&self) -> Duration {
        Duration::from_millis(self.overlay_fade_ms)
    }
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            entry_points: FullscreenApi::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. User config file (~/.config/player-overlay/config.toml on Linux)
    /// 3. The explicitly given file, which must exist
    /// 4. Environment variables (PLAYER_OVERLAY_* prefix)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config = Self::from_file(&user_path)?;
            }
        }

        if let Some(path) = explicit {
            config = Self::from_file(path)?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .config_err(&format!("Failed to read {}", path.display()))?;

        toml::from_str(&contents).config_err(&format!("Failed to parse {}", path.display()))
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(fade) = std::env::var("PLAYER_OVERLAY_FADE_MS") {
            self.player.overlay_fade_ms = fade.parse::<u64>().config_err("Invalid PLAYER_OVERLAY_FADE_MS")?;
        }

        if let Ok(log_level) = std::env::var("PLAYER_OVERLAY_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.player.overlay_fade_ms > MAX_FADE_MS {
            return Err(OverlayError::Config(format!(
                "Overlay fade delay must be at most {} ms",
                MAX_FADE_MS
            )));
        }

        let entry_points = &self.fullscreen.entry_points;
        if entry_points.is_empty() {
            return Err(OverlayError::Config("At least one fullscreen entry point is required".to_string()));
        }
        for (i, api) in entry_points.iter().enumerate() {
            if entry_points[..i].contains(api) {
                return Err(OverlayError::Config(format!("Duplicate fullscreen entry point '{}'", api)));
            }
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(OverlayError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level,
                valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("player-overlay").join("config.toml"))
    }
}

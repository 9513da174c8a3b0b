//! Configuration and settings management for StageKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Canvas resolution
//! - Canvas interaction (magnet, snap distance, minimum size, edge feedback)
//! - Timeline scheduling (zoom, lane height, snap pixels, durations, ripple)

use serde::{Deserialize, Serialize};
use stagekit_core::{CanvasSize, InteractionConfig, TimelineConfig};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Logical canvas resolution
    pub canvas: CanvasSize,
    /// Canvas drag/snap preferences
    pub interaction: InteractionConfig,
    /// Timeline preferences
    pub timeline: TimelineConfig,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.canvas.w > 0.0) {
            return Err(ConfigError::out_of_range("canvas.w", self.canvas.w));
        }
        if !(self.canvas.h > 0.0) {
            return Err(ConfigError::out_of_range("canvas.h", self.canvas.h));
        }

        let i = &self.interaction;
        if !(i.snap_distance >= 0.0) {
            return Err(ConfigError::out_of_range(
                "interaction.snap_distance",
                i.snap_distance,
            ));
        }
        if !(i.min_size > 0.0) {
            return Err(ConfigError::out_of_range("interaction.min_size", i.min_size));
        }
        if !(i.edge_tolerance >= 0.0) {
            return Err(ConfigError::out_of_range(
                "interaction.edge_tolerance",
                i.edge_tolerance,
            ));
        }

        let t = &self.timeline;
        if !(t.min_zoom > 0.0) || t.min_zoom > t.max_zoom {
            return Err(ConfigError::out_of_range("timeline.min_zoom", t.min_zoom));
        }
        if t.pixels_per_second < t.min_zoom || t.pixels_per_second > t.max_zoom {
            return Err(ConfigError::out_of_range(
                "timeline.pixels_per_second",
                t.pixels_per_second,
            ));
        }
        if !(t.track_height > 0.0) {
            return Err(ConfigError::out_of_range("timeline.track_height", t.track_height));
        }
        if !(t.snap_pixels >= 0.0) {
            return Err(ConfigError::out_of_range("timeline.snap_pixels", t.snap_pixels));
        }
        if !(t.min_duration > 0.0) {
            return Err(ConfigError::out_of_range("timeline.min_duration", t.min_duration));
        }
        if t.default_clip_duration < t.min_duration {
            return Err(ConfigError::out_of_range(
                "timeline.default_clip_duration",
                t.default_clip_duration,
            ));
        }

        Ok(())
    }
}

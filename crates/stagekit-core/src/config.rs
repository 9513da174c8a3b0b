//! Engine parameters.
//!
//! These structs are passed explicitly into every engine call instead of being
//! looked up through shared UI state. They are serde-friendly so the settings
//! crate can persist them verbatim.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Logical canvas resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub w: f64,
    pub h: f64,
}

impl CanvasSize {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// Height of one of the three horizontal background regions.
    pub fn third(&self) -> f64 {
        self.h / 3.0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(constants::DEFAULT_CANVAS_WIDTH, constants::DEFAULT_CANVAS_HEIGHT)
    }
}

/// Canvas interaction settings (drag, snap, region feedback).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Shared magnet toggle. When off, snapping is a passthrough.
    pub magnet: bool,
    /// Snap threshold in logical units.
    pub snap_distance: f64,
    /// Minimum entity width/height in logical units.
    pub min_size: f64,
    /// Edge-contact tolerance in logical units.
    pub edge_tolerance: f64,
    /// Lifetime of an edge-contact highlight in milliseconds.
    pub edge_flash_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            magnet: true,
            snap_distance: constants::SNAP_DISTANCE,
            min_size: constants::MIN_ENTITY_SIZE,
            edge_tolerance: constants::EDGE_CONTACT_TOLERANCE,
            edge_flash_ms: constants::EDGE_FLASH_MS,
        }
    }
}

/// Timeline scheduling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub magnet: bool,
    /// Shift later clips on the same track when a clip is trimmed or removed.
    pub ripple: bool,
    /// Current zoom.
    pub pixels_per_second: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Snap threshold in screen pixels.
    pub snap_pixels: f64,
    /// Lane height in pixels, used for cross-track moves.
    pub track_height: f64,
    /// Shortest clip duration in seconds.
    pub min_duration: f64,
    /// Duration of clips created by a drop.
    pub default_clip_duration: f64,
}

impl TimelineConfig {
    /// Snap threshold converted into time units at the current zoom.
    pub fn snap_time(&self) -> f64 {
        if self.pixels_per_second > 0.0 {
            self.snap_pixels / self.pixels_per_second
        } else {
            self.snap_pixels
        }
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            magnet: true,
            ripple: false,
            pixels_per_second: constants::DEFAULT_PIXELS_PER_SECOND,
            min_zoom: constants::MIN_PIXELS_PER_SECOND,
            max_zoom: constants::MAX_PIXELS_PER_SECOND,
            snap_pixels: constants::TIMELINE_SNAP_PIXELS,
            track_height: constants::TRACK_HEIGHT_PX,
            min_duration: constants::MIN_CLIP_DURATION,
            default_clip_duration: constants::DEFAULT_CLIP_DURATION,
        }
    }
}

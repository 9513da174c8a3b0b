//! Time/pixel conversion for the timeline.
//!
//! The timeline draws clips at `pixels_per_second`; pointer offsets in pixels
//! are converted to seconds before any scheduling math.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal timeline scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    pub pixels_per_second: f64,
}

impl TimeScale {
    pub fn new(pixels_per_second: f64) -> Self {
        Self { pixels_per_second }
    }

    /// Converts a pixel offset to seconds. A non-positive zoom is treated as 1.
    pub fn px_to_time(&self, px: f64) -> f64 {
        px / self.effective()
    }

    pub fn time_to_px(&self, time: f64) -> f64 {
        time * self.effective()
    }

    /// Returns a scale clamped to `[min, max]`.
    pub fn clamped(&self, min: f64, max: f64) -> Self {
        Self::new(self.pixels_per_second.clamp(min, max))
    }

    fn effective(&self) -> f64 {
        if self.pixels_per_second > 0.0 && self.pixels_per_second.is_finite() {
            self.pixels_per_second
        } else {
            1.0
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} px/s", self.pixels_per_second)
    }
}

/// Formats seconds as `HH:MM:SS.cc`, the ruler/readout format.
pub fn format_timecode(total_seconds: f64) -> String {
    let total = total_seconds.max(0.0);
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = (total % 60.0).floor() as u64;
    let centis = ((total - total.floor()) * 100.0).floor() as u64;
    format!("{:02}:{:02}:{:02}.{:02}", hours, minutes, seconds, centis)
}

//! Time-domain records: clips scheduled on ordered tracks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("c_{}", uuid::Uuid::new_v4().simple()))
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier of a track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Presentation tag of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
}

/// Media kind carried by a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Video,
    Image,
    Sound,
    Text,
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Image => write!(f, "image"),
            Self::Sound => write!(f, "sound"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// A lane of the timeline. Its position in the track list sets the vertical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub kind: TrackKind,
    #[serde(default)]
    pub name: String,
    /// Locked tracks reject clip gestures and incoming cross-track moves.
    #[serde(default)]
    pub locked: bool,
    /// Hidden tracks do not contribute clips to the composited stack.
    #[serde(default)]
    pub hidden: bool,
}

impl Track {
    pub fn new(id: impl Into<TrackId>, kind: TrackKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: String::new(),
            locked: false,
            hidden: false,
        }
    }
}

/// A time-bounded item on a track. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: ClipId,
    pub track_id: TrackId,
    #[serde(default)]
    pub start: f64,
    pub duration: f64,
    pub kind: ClipKind,
    #[serde(default)]
    pub name: String,
}

impl Clip {
    pub fn new(
        id: impl Into<ClipId>,
        track_id: impl Into<TrackId>,
        start: f64,
        duration: f64,
        kind: ClipKind,
    ) -> Self {
        Self {
            id: id.into(),
            track_id: track_id.into(),
            start,
            duration,
            kind,
            name: String::new(),
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Half-open activity test: `start <= time < end`.
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// True when the two clips share a track and their intervals intersect.
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.track_id == other.track_id && self.start < other.end() && other.start < self.end()
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for ClipId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

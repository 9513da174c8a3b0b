//! Logical-unit geometry primitives.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CanvasSize;

/// A point in logical canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Axis-aligned box in logical canvas units. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rect covering the whole canvas.
    pub fn from_canvas(size: CanvasSize) -> Self {
        Self::new(0.0, 0.0, size.w, size.h)
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.h / 2.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Replaces non-finite fields with 0 so that downstream math stays total.
    pub fn sanitized(&self) -> Self {
        let fix = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self::new(fix(self.x), fix(self.y), fix(self.w), fix(self.h))
    }

    /// True when the rect lies within `[0, size.w] x [0, size.h]`, allowing `eps` slack.
    pub fn within(&self, size: CanvasSize, eps: f64) -> bool {
        self.x >= -eps
            && self.y >= -eps
            && self.right() <= size.w + eps
            && self.bottom() <= size.h + eps
    }

    /// Geometry as fractions of the canvas, used to re-project on resolution change.
    pub fn normalized(&self, size: CanvasSize) -> Self {
        let cw = if size.w > 0.0 { size.w } else { 1.0 };
        let ch = if size.h > 0.0 { size.h } else { 1.0 };
        Self::new(self.x / cw, self.y / ch, self.w / cw, self.h / ch)
    }

    /// Inverse of [`Rect::normalized`].
    pub fn denormalized(&self, size: CanvasSize) -> Self {
        Self::new(
            self.x * size.w,
            self.y * size.h,
            self.w * size.w,
            self.h * size.h,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}x{:.1})",
            self.x, self.y, self.w, self.h
        )
    }
}

//! Magnetic snapping of entity positions to reference lines.
//!
//! Candidate lines are collected per axis, canvas lines first and then the
//! lines of every other visible entity in iteration order. For each line the
//! moving entity's leading edge, trailing edge and center are tested in that
//! order and the first one within the threshold wins, so iteration order is
//! the tie-break.

use smallvec::SmallVec;
use stagekit_core::{CanvasSize, Entity, EntityId, InteractionConfig, Rect};

/// Distance below which an anchor is considered already aligned with a line.
const ALIGNED_EPSILON: f64 = 1e-6;

/// Candidate lines for one axis.
pub type AxisLines = SmallVec<[f64; 24]>;

/// Per-axis candidate line sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapLines {
    pub x: AxisLines,
    pub y: AxisLines,
}

impl SnapLines {
    /// Canvas edges and center only.
    pub fn for_canvas(canvas: CanvasSize) -> Self {
        let mut lines = Self::default();
        lines.x.extend([0.0, canvas.w / 2.0, canvas.w]);
        lines.y.extend([0.0, canvas.h / 2.0, canvas.h]);
        lines
    }

    /// Canvas lines followed by the edges and center of every visible entity
    /// other than `moving`.
    pub fn collect<'a, I>(moving: &EntityId, entities: I, canvas: CanvasSize) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let mut lines = Self::for_canvas(canvas);
        for other in entities {
            if other.hidden || &other.id == moving {
                continue;
            }
            let r = other.rect.sanitized();
            lines.x.extend([r.x, r.right(), r.center_x()]);
            lines.y.extend([r.y, r.bottom(), r.center_y()]);
        }
        lines
    }
}

/// Outcome of a snap query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub rect: Rect,
    pub snapped_x: bool,
    pub snapped_y: bool,
    /// Line the horizontal position locked to, for guide rendering.
    pub guide_x: Option<f64>,
    /// Line the vertical position locked to.
    pub guide_y: Option<f64>,
}

impl SnapResult {
    fn passthrough(rect: Rect) -> Self {
        Self {
            rect,
            snapped_x: false,
            snapped_y: false,
            guide_x: None,
            guide_y: None,
        }
    }
}

/// Snaps positions against candidate lines with a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResolver {
    enabled: bool,
    distance: f64,
}

impl SnapResolver {
    pub fn new(enabled: bool, distance: f64) -> Self {
        Self { enabled, distance }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.magnet, config.snap_distance)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Snaps `rect` against the canvas and the other visible entities.
    ///
    /// Only the position changes; width and height are returned untouched.
    pub fn snap(
        &self,
        entity_id: &EntityId,
        rect: Rect,
        entities: &[Entity],
        canvas: CanvasSize,
    ) -> SnapResult {
        if !self.enabled {
            return SnapResult::passthrough(rect);
        }
        let lines = SnapLines::collect(entity_id, entities, canvas);
        self.snap_to_lines(rect, &lines)
    }

    /// Snaps `rect` against a prepared line set.
    pub fn snap_to_lines(&self, rect: Rect, lines: &SnapLines) -> SnapResult {
        if !self.enabled {
            return SnapResult::passthrough(rect);
        }

        let mut result = SnapResult::passthrough(rect);
        if let Some((x, line)) = snap_axis(rect.x, rect.w, &lines.x, self.distance) {
            result.rect.x = x;
            result.snapped_x = true;
            result.guide_x = Some(line);
        }
        if let Some((y, line)) = snap_axis(rect.y, rect.h, &lines.y, self.distance) {
            result.rect.y = y;
            result.snapped_y = true;
            result.guide_y = Some(line);
        }

        tracing::trace!(
            "snap {} -> {} (guides x={:?} y={:?})",
            rect,
            result.rect,
            result.guide_x,
            result.guide_y
        );
        result
    }
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

/// Snaps one axis. Returns the new position and the line it locked to.
///
/// A position that already has an anchor exactly on some line is a fixed
/// point and is returned unchanged, which makes snapping idempotent.
fn snap_axis(pos: f64, size: f64, lines: &[f64], distance: f64) -> Option<(f64, f64)> {
    let anchors = |p: f64| [p, p + size, p + size / 2.0];

    for &line in lines {
        if anchors(pos)
            .iter()
            .any(|a| (a - line).abs() < ALIGNED_EPSILON)
        {
            return Some((pos, line));
        }
    }

    for &line in lines {
        let [lead, trail, center] = anchors(pos);
        if (lead - line).abs() < distance {
            return Some((line, line));
        }
        if (trail - line).abs() < distance {
            return Some((line - size, line));
        }
        if (center - line).abs() < distance {
            return Some((line - size / 2.0, line));
        }
    }

    None
}

/// Snaps `rect` for `entity_id` using the interaction settings.
pub fn snap(
    entity_id: &EntityId,
    rect: Rect,
    entities: &[Entity],
    canvas: CanvasSize,
    config: &InteractionConfig,
) -> SnapResult {
    SnapResolver::from_config(config).snap(entity_id, rect, entities, canvas)
}

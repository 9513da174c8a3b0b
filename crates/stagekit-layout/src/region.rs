//! Role-dependent region constraints.
//!
//! Background entities outside the `full` column live in one horizontal third
//! of the canvas; every other entity is bounded by the canvas alone. Clamping
//! is total: a region smaller than the minimum size resolves toward the
//! minimum size and pins the entity to the region start.

use stagekit_core::{CanvasSize, ColRole, Entity, Rect, RowRole};

/// Area an entity with the given roles may occupy.
pub fn allowed_region(row_role: RowRole, col_role: ColRole, canvas: CanvasSize) -> Rect {
    match (row_role, col_role.third_index()) {
        (RowRole::Background, Some(k)) => {
            let third = canvas.third();
            Rect::new(0.0, third * k as f64, canvas.w, third)
        }
        _ => Rect::from_canvas(canvas),
    }
}

/// Allowed area for `entity`.
pub fn region_for(entity: &Entity, canvas: CanvasSize) -> Rect {
    allowed_region(entity.row_role, entity.col_role, canvas)
}

/// Translates (and if necessary shrinks) `rect` so that it fits in `bounds`.
///
/// Sizes below `min_size` are raised to it first. A size larger than the
/// bounds is capped to the bounds and the origin pinned to the bounds start.
pub fn clamp_into(rect: Rect, bounds: Rect, min_size: f64) -> Rect {
    let rect = rect.sanitized();
    let (x, w) = clamp_axis(rect.x, rect.w, bounds.x, bounds.right(), min_size);
    let (y, h) = clamp_axis(rect.y, rect.h, bounds.y, bounds.bottom(), min_size);
    Rect::new(x, y, w, h)
}

fn clamp_axis(pos: f64, size: f64, lo: f64, hi: f64, min_size: f64) -> (f64, f64) {
    let extent = (hi - lo).max(0.0);
    let size = size.max(min_size);
    let upper = hi - size;
    if size > extent || !(upper >= lo) {
        (lo, extent.max(min_size))
    } else {
        (pos.clamp(lo, upper), size)
    }
}

/// Clamps `rect` into the canvas.
pub fn clamp_to_canvas(rect: Rect, canvas: CanvasSize, min_size: f64) -> Rect {
    clamp_into(rect, Rect::from_canvas(canvas), min_size)
}

/// Clamps `rect` into the region its roles allow.
pub fn apply_region_constraint(
    rect: Rect,
    row_role: RowRole,
    col_role: ColRole,
    canvas: CanvasSize,
    min_size: f64,
) -> Rect {
    clamp_into(rect, allowed_region(row_role, col_role, canvas), min_size)
}

/// Stateless constraint policy bound to one canvas size and minimum size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionConstraint {
    pub canvas: CanvasSize,
    pub min_size: f64,
}

impl RegionConstraint {
    pub fn new(canvas: CanvasSize, min_size: f64) -> Self {
        Self { canvas, min_size }
    }

    pub fn region(&self, entity: &Entity) -> Rect {
        region_for(entity, self.canvas)
    }

    pub fn apply(&self, entity: &Entity, rect: Rect) -> Rect {
        apply_region_constraint(
            rect,
            entity.row_role,
            entity.col_role,
            self.canvas,
            self.min_size,
        )
    }
}

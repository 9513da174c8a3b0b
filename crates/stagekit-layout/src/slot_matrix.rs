//! Deterministic slot identity and stacking order.
//!
//! A slot is a `(column index, row role)` cell. Its key is
//! `{column role}_{row name}` and its z-index is a per-column base plus a
//! per-row offset. Later columns stack above earlier ones at the same row;
//! within any column effects sit above text, which sits above background.

use serde::{Deserialize, Serialize};
use stagekit_core::constants::{
    Z_BASE, Z_COLUMN_STEP, Z_OFFSET_BACKGROUND, Z_OFFSET_EFFECT, Z_OFFSET_TEXT,
};
use stagekit_core::{CanvasSize, ColRole, Rect, RowRole, SlotKey};

/// Everything derived from one slot-matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub col_index: usize,
    pub col_role: ColRole,
    pub row_role: RowRole,
    pub slot_key: SlotKey,
    pub z_index: i32,
}

/// Column index to semantic role.
pub fn col_role(col_index: usize) -> ColRole {
    ColRole::from_index(col_index)
}

pub fn slot_key(col_index: usize, row_role: RowRole) -> SlotKey {
    SlotKey(format!(
        "{}_{}",
        col_role(col_index).token(),
        row_role.slot_name()
    ))
}

fn row_offset(row_role: RowRole) -> i32 {
    match row_role {
        RowRole::Background => Z_OFFSET_BACKGROUND,
        RowRole::Text => Z_OFFSET_TEXT,
        RowRole::Effect => Z_OFFSET_EFFECT,
    }
}

/// Stacking base of a column. Saturates for absurd column counts.
fn column_base(col_index: usize) -> i32 {
    let col = i32::try_from(col_index).unwrap_or(i32::MAX);
    Z_BASE.saturating_add(col.saturating_mul(Z_COLUMN_STEP))
}

pub fn z_index(col_index: usize, row_role: RowRole) -> i32 {
    column_base(col_index).saturating_add(row_offset(row_role))
}

/// Slot key, z-index and roles for one cell.
pub fn compute_slot(col_index: usize, row_role: RowRole) -> SlotAssignment {
    SlotAssignment {
        col_index,
        col_role: col_role(col_index),
        row_role,
        slot_key: slot_key(col_index, row_role),
        z_index: z_index(col_index, row_role),
    }
}

/// Initial geometry of an entity created from an empty slot.
///
/// `full` and synthesized columns cover the canvas. `high`, `mid` and `low`
/// cover their third, with boundaries at whole units; the low third absorbs
/// the rounding remainder.
pub fn default_geometry(col_role: ColRole, canvas: CanvasSize) -> Rect {
    let third = (canvas.h / 3.0).round();
    match col_role {
        ColRole::High => Rect::new(0.0, 0.0, canvas.w, third),
        ColRole::Mid => Rect::new(0.0, third, canvas.w, third),
        ColRole::Low => Rect::new(0.0, third * 2.0, canvas.w, canvas.h - third * 2.0),
        ColRole::Full | ColRole::Extra(_) => Rect::from_canvas(canvas),
    }
}

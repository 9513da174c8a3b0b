//! Canvas type definitions: HitTarget, SlotActivation, DropKind.

use serde::{Deserialize, Serialize};
use stagekit_core::{ClipKind, EntityId, RowRole};

use crate::drag::ResizeHandle;

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    /// A resize handle of the selected entity.
    Handle(EntityId, ResizeHandle),
    /// The body of the topmost entity.
    Body(EntityId),
    /// Empty canvas.
    Background,
}

/// Result of clicking a slot-matrix cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum SlotActivation {
    /// The occupant became the selection.
    Selected(EntityId),
    /// The occupant was already selected and has been deselected.
    Deselected(EntityId),
    /// The slot was empty; a new entity was created in it.
    Created(EntityId),
}

impl SlotActivation {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Selected(id) | Self::Deselected(id) | Self::Created(id) => id,
        }
    }
}

/// Row role given to a box created by dropping an asset of `kind`.
pub fn drop_row_role(kind: ClipKind) -> RowRole {
    match kind {
        ClipKind::Sound => RowRole::Effect,
        ClipKind::Video | ClipKind::Image | ClipKind::Text => RowRole::Background,
    }
}

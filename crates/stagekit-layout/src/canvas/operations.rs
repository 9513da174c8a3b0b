//! Pointer gestures, slot activation and asset drops for Canvas.

use std::time::Instant;

use stagekit_core::constants::{DROP_CASCADE_OFFSET, HANDLE_HIT_RADIUS_PX, Z_DROPPED_ASSET};
use stagekit_core::{
    ClipKind, ColRole, Entity, EntityId, Error, GestureError, Point, Rect, RowRole, StoreError,
};

use super::types::{drop_row_role, HitTarget, SlotActivation};
use super::Canvas;
use crate::composite::{compose_stack, StackEntry};
use crate::drag::{DragFrame, DragMode, DragOutcome};
use crate::region::{apply_region_constraint, clamp_to_canvas};
use crate::slot_matrix::{compute_slot, default_geometry};
use crate::timeline::TimelineSnapshot;

impl Canvas {
    /// What lies under a logical point. Handles of the selected entity take
    /// precedence over bodies.
    pub fn hit_target_at(&self, point: Point, handle_tolerance: f64) -> HitTarget {
        let snapshot = self.store.snapshot();
        if let Some((id, handle)) =
            self.selection_manager
                .handle_at(snapshot.entities(), point, handle_tolerance)
        {
            return HitTarget::Handle(id, handle);
        }
        match self.selection_manager.hit_test(snapshot.entities(), point) {
            Some(entity) => HitTarget::Body(entity.id.clone()),
            None => HitTarget::Background,
        }
    }

    /// Pointer-down in screen coordinates.
    ///
    /// Queries the viewport once and keeps the resulting coordinate space until
    /// pointer-up. A handle of the selected entity starts a resize, a body
    /// selects and starts a move, and empty canvas clears the selection.
    pub fn pointer_down(&mut self, screen: Point) -> Result<HitTarget, Error> {
        if let Some(id) = self.drag.active_entity() {
            return Err(GestureError::AlreadyActive { id: id.to_string() }.into());
        }

        let space = self.coordinate_space();
        let logical = space.to_logical(screen);
        let target = self.hit_target_at(logical, space.length_to_logical(HANDLE_HIT_RADIUS_PX));

        match &target {
            HitTarget::Handle(id, handle) => {
                self.begin_drag(id, DragMode::Resize(*handle), logical)?;
            }
            HitTarget::Body(id) => {
                self.selection_manager.select(id.clone());
                self.begin_drag(id, DragMode::Move, logical)?;
            }
            HitTarget::Background => {
                self.selection_manager.clear();
                return Ok(target);
            }
        }
        self.gesture_space = Some(space);
        Ok(target)
    }

    /// Pointer-move in screen coordinates. `None` when no gesture is running.
    pub fn pointer_move(&mut self, screen: Point) -> Option<DragFrame> {
        self.pointer_move_at(screen, Instant::now())
    }

    pub fn pointer_move_at(&mut self, screen: Point, now: Instant) -> Option<DragFrame> {
        let space = self.gesture_space?;
        self.update_drag_at(space.to_logical(screen), now)
    }

    /// Pointer-up. Commits the last computed geometry of a running gesture.
    pub fn pointer_up(&mut self) -> Result<Option<DragOutcome>, Error> {
        if !self.drag.is_active() {
            self.gesture_space = None;
            return Ok(None);
        }
        self.end_drag().map(Some)
    }

    /// Starts a gesture at a logical pointer position.
    ///
    /// Resize handles are only available on the selected entity.
    pub fn begin_drag(&mut self, id: &EntityId, mode: DragMode, pointer: Point) -> Result<(), Error> {
        if let Some(active) = self.drag.active_entity() {
            return Err(GestureError::AlreadyActive {
                id: active.to_string(),
            }
            .into());
        }
        let entity = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntity { id: id.to_string() })?;
        if matches!(mode, DragMode::Resize(_)) && !self.selection_manager.is_selected(id) {
            return Err(GestureError::NotSelected { id: id.to_string() }.into());
        }

        self.drag.begin_drag(&entity, mode, pointer)?;
        if let Err(err) = self.store.lock(id) {
            // Nothing else takes locks, but keep the controller consistent.
            let _ = self.drag.end_drag();
            return Err(err.into());
        }
        Ok(())
    }

    /// Applies a logical pointer position to the running gesture and commits
    /// the resulting geometry.
    pub fn update_drag(&mut self, pointer: Point) -> Option<DragFrame> {
        self.update_drag_at(pointer, Instant::now())
    }

    pub fn update_drag_at(&mut self, pointer: Point, now: Instant) -> Option<DragFrame> {
        let view = self.store.snapshot();
        let frame = self.drag.update_drag_at(pointer, view.entities(), now)?;
        match self.store.apply_gesture_frame(&frame.entity_id, frame.rect) {
            Ok(snapshot) => self.notify(&snapshot),
            Err(err) => tracing::warn!("Dropped drag frame for {}: {}", frame.entity_id, err),
        }
        Some(frame)
    }

    /// Ends the running gesture and releases the entity.
    pub fn end_drag(&mut self) -> Result<DragOutcome, Error> {
        let outcome = self.drag.end_drag()?;
        self.store.unlock();
        self.gesture_space = None;
        Ok(outcome)
    }

    /// Slot-matrix cell click.
    ///
    /// An occupied slot toggles the selection of its occupant. An empty slot
    /// gets a new entity with the slot's key and z-index, sized to the region
    /// its column implies.
    pub fn activate_slot(
        &mut self,
        col_index: usize,
        row_role: RowRole,
    ) -> Result<SlotActivation, StoreError> {
        let slot = compute_slot(col_index, row_role);
        let snapshot = self.store.snapshot();

        if let Some(holder) = snapshot.slot_holder(&slot.slot_key) {
            let id = holder.id.clone();
            return Ok(match self.selection_manager.toggle(id.clone()) {
                Some(_) => SlotActivation::Selected(id),
                None => SlotActivation::Deselected(id),
            });
        }

        let canvas = self.canvas_size();
        let rect = apply_region_constraint(
            default_geometry(slot.col_role, canvas),
            row_role,
            slot.col_role,
            canvas,
            self.config.min_size,
        );
        let id = EntityId::generate(&format!("box_{}", slot.slot_key));
        let entity = Entity::new(id.clone(), rect, row_role)
            .with_col_role(slot.col_role)
            .with_z_index(slot.z_index)
            .with_slot(slot.slot_key.clone());

        let snapshot = self.store.insert(entity)?;
        tracing::debug!("Created {} in slot {}", id, slot.slot_key);
        self.selection_manager.select(id.clone());
        self.notify(&snapshot);
        Ok(SlotActivation::Created(id))
    }

    /// Creates a box for an asset dropped at a logical point.
    ///
    /// The box is half the canvas in each dimension, centered on the drop
    /// point and cascaded by `index` for multi-asset drops, then clamped into
    /// the canvas.
    pub fn drop_asset(
        &mut self,
        kind: ClipKind,
        point: Point,
        index: usize,
    ) -> Result<EntityId, StoreError> {
        let canvas = self.canvas_size();
        let (w, h) = (canvas.w / 2.0, canvas.h / 2.0);
        let offset = DROP_CASCADE_OFFSET * index as f64;
        let rect = clamp_to_canvas(
            Rect::new(point.x - w / 2.0 + offset, point.y - h / 2.0 + offset, w, h),
            canvas,
            self.config.min_size,
        );

        let z = Z_DROPPED_ASSET.saturating_add(i32::try_from(index).unwrap_or(i32::MAX));
        let id = EntityId::generate("box_drop");
        let mut entity = Entity::new(id.clone(), rect, drop_row_role(kind))
            .with_col_role(ColRole::Full)
            .with_z_index(z);
        entity.content = serde_json::json!({ "asset": kind });

        let snapshot = self.store.insert(entity)?;
        tracing::debug!("Dropped {} asset as {} at {}", kind, id, rect);
        self.notify(&snapshot);
        Ok(id)
    }

    /// Drops several assets at once; each one cascades from the previous.
    pub fn drop_assets(&mut self, kinds: &[ClipKind], point: Point) -> Result<Vec<EntityId>, StoreError> {
        kinds
            .iter()
            .enumerate()
            .map(|(index, kind)| self.drop_asset(*kind, point, index))
            .collect()
    }

    /// Composited stack of `timeline`'s clips at its playhead plus this
    /// canvas' layers.
    pub fn compose(&self, timeline: &TimelineSnapshot) -> Vec<StackEntry> {
        let snapshot = self.store.snapshot();
        compose_stack(
            timeline,
            snapshot.entities(),
            self.canvas_size(),
            timeline.playhead(),
        )
    }
}

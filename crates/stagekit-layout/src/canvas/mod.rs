//! Canvas facade for direct manipulation of layer entities.
//!
//! Ties the entity store, selection, drag controller and viewport together.
//! Presentation code feeds it pointer events in screen coordinates and
//! receives every committed snapshot through the commit listener.

mod operations;
mod types;

pub use types::{drop_row_role, HitTarget, SlotActivation};

use std::fmt;
use std::sync::Arc;

use stagekit_core::{
    CanvasSize, Column, CommitCallback, Entity, EntityId, GestureError, InteractionConfig, Rect,
    StoreError,
};

use crate::drag::DragController;
use crate::entity_store::{EntitySnapshot, EntityStore};
use crate::region::apply_region_constraint;
use crate::selection_manager::SelectionManager;
use crate::viewport::{CoordinateSpace, FixedViewport, Viewport};

/// Canvas state: entities, selection and the active gesture.
pub struct Canvas {
    store: EntityStore,
    pub selection_manager: SelectionManager,
    drag: DragController,
    viewport: Box<dyn Viewport>,
    /// Coordinate space captured at gesture start.
    gesture_space: Option<CoordinateSpace>,
    config: InteractionConfig,
    columns: Vec<Column>,
    on_commit: Option<CommitCallback<Arc<EntitySnapshot>>>,
}

impl Canvas {
    /// Creates an empty canvas drawn 1:1 at the screen origin.
    pub fn new(canvas: CanvasSize, config: InteractionConfig) -> Self {
        Self::with_viewport(canvas, config, FixedViewport::identity(canvas))
    }

    /// Creates an empty canvas whose on-screen placement comes from `viewport`.
    pub fn with_viewport(
        canvas: CanvasSize,
        config: InteractionConfig,
        viewport: impl Viewport + 'static,
    ) -> Self {
        Self {
            store: EntityStore::new(canvas),
            selection_manager: SelectionManager::new(),
            drag: DragController::new(canvas, config),
            viewport: Box::new(viewport),
            gesture_space: None,
            config,
            columns: Vec::new(),
            on_commit: None,
        }
    }

    /// Replaces the viewport. A running gesture keeps its captured space.
    pub fn set_viewport(&mut self, viewport: impl Viewport + 'static) {
        self.viewport = Box::new(viewport);
    }

    /// Coordinate space for the viewport as it is right now.
    pub fn coordinate_space(&self) -> CoordinateSpace {
        CoordinateSpace::new(self.viewport.rendered_rect(), self.canvas_size())
    }

    pub fn canvas_size(&self) -> CanvasSize {
        self.store.canvas()
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
        self.drag.set_config(config);
    }

    /// Toggles magnetic snapping.
    pub fn set_magnet(&mut self, on: bool) {
        let mut config = self.config;
        config.magnet = on;
        self.set_config(config);
    }

    /// Read-only access to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<EntitySnapshot> {
        self.store.snapshot()
    }

    pub fn get_entity(&self, id: &EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    pub fn entity_count(&self) -> usize {
        self.store.len()
    }

    pub fn selected_id(&self) -> Option<&EntityId> {
        self.selection_manager.selected_id()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Registers the callback receiving every committed snapshot.
    pub fn set_commit_listener(&mut self, listener: impl FnMut(Arc<EntitySnapshot>) + 'static) {
        self.on_commit = Some(Box::new(listener));
    }

    pub fn clear_commit_listener(&mut self) {
        self.on_commit = None;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Appends a slot-matrix column, returning its index.
    pub fn add_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    /// Adds an entity, clamping its geometry into its allowed region.
    pub fn insert_entity(&mut self, mut entity: Entity) -> Result<Arc<EntitySnapshot>, StoreError> {
        entity.rect = self.constrain(&entity, entity.rect);
        let snapshot = self.store.insert(entity)?;
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Removes an entity and drops it from the selection.
    pub fn remove_entity(&mut self, id: &EntityId) -> Result<Entity, StoreError> {
        let (entity, snapshot) = self.store.remove(id)?;
        self.selection_manager.prune(snapshot.entities());
        self.notify(&snapshot);
        Ok(entity)
    }

    /// Geometry write from outside a gesture, clamped like a drag commit.
    pub fn set_entity_geometry(
        &mut self,
        id: &EntityId,
        rect: Rect,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        let entity = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::UnknownEntity { id: id.to_string() })?;
        let rect = self.constrain(entity, rect);
        let snapshot = self.store.set_geometry(id, rect)?;
        self.notify(&snapshot);
        Ok(snapshot)
    }

    pub fn set_hidden(
        &mut self,
        id: &EntityId,
        hidden: bool,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        let snapshot = self.store.set_hidden(id, hidden)?;
        self.selection_manager.prune(snapshot.entities());
        self.notify(&snapshot);
        Ok(snapshot)
    }

    /// Changes the logical resolution, re-projecting every entity and
    /// re-applying the minimum size and region constraint on the new canvas.
    ///
    /// Refused while a gesture is running.
    pub fn resize_canvas(
        &mut self,
        canvas: CanvasSize,
    ) -> Result<Arc<EntitySnapshot>, GestureError> {
        if let Some(id) = self.drag.active_entity() {
            return Err(GestureError::AlreadyActive { id: id.to_string() });
        }
        let min_size = self.config.min_size;
        let snapshot = self.store.rescale_with(canvas, |entity, rect| {
            apply_region_constraint(rect, entity.row_role, entity.col_role, canvas, min_size)
        });
        self.drag.set_canvas(canvas);
        self.notify(&snapshot);
        Ok(snapshot)
    }

    fn constrain(&self, entity: &Entity, rect: Rect) -> Rect {
        apply_region_constraint(
            rect,
            entity.row_role,
            entity.col_role,
            self.canvas_size(),
            self.config.min_size,
        )
    }

    fn notify(&mut self, snapshot: &Arc<EntitySnapshot>) {
        if let Some(listener) = self.on_commit.as_mut() {
            listener(Arc::clone(snapshot));
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasSize::default(), InteractionConfig::default())
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("version", &self.store.version())
            .field("entities", &self.store.len())
            .field("selected", &self.selection_manager.selected_id())
            .field("drag", self.drag.state())
            .field("rendered", &self.viewport.rendered_rect())
            .field("config", &self.config)
            .finish()
    }
}

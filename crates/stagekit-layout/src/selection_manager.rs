use stagekit_core::{Entity, EntityId, Point};

use crate::drag::ResizeHandle;

/// Manages the primary selection and pointer hit-testing.
///
/// # Selection Model
///
/// - **Primary Selection**: at most one entity is selected (`selected_id`)
/// - **Toggle**: toggling the selected entity clears the selection
/// - **Handles**: resize handles exist only on the selected entity; an
///   unselected entity is hit-tested by its body alone
/// - **Stacking**: bodies are hit-tested topmost first (highest z-index, later
///   insertion wins a tie); hidden entities are never hit
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected entity, if any
    selected_id: Option<EntityId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagekit_layout::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected entity.
    pub fn selected_id(&self) -> Option<&EntityId> {
        self.selected_id.as_ref()
    }

    pub fn is_selected(&self, id: &EntityId) -> bool {
        self.selected_id.as_ref() == Some(id)
    }

    /// Makes `id` the selection.
    pub fn select(&mut self, id: EntityId) {
        self.selected_id = Some(id);
    }

    /// Selects `id`, or clears the selection if `id` is already selected.
    ///
    /// # Returns
    ///
    /// The selection after the toggle.
    pub fn toggle(&mut self, id: EntityId) -> Option<&EntityId> {
        if self.is_selected(&id) {
            self.selected_id = None;
        } else {
            self.selected_id = Some(id);
        }
        self.selected_id.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    /// Topmost visible entity whose body contains `point`.
    ///
    /// # Arguments
    ///
    /// * `entities` - Committed entities in insertion order
    /// * `point` - Pointer position in logical units
    pub fn hit_test<'a>(&self, entities: &'a [Entity], point: Point) -> Option<&'a Entity> {
        entities
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.hidden && e.rect.contains(point))
            .max_by_key(|(i, e)| (e.z_index, *i))
            .map(|(_, e)| e)
    }

    /// Resize handle of the selected entity under `point`.
    ///
    /// # Arguments
    ///
    /// * `entities` - Committed entities
    /// * `point` - Pointer position in logical units
    /// * `tolerance` - Hit radius in logical units
    ///
    /// # Returns
    ///
    /// `None` when nothing is selected, the selected entity is hidden or gone,
    /// or no handle is within `tolerance`.
    pub fn handle_at(
        &self,
        entities: &[Entity],
        point: Point,
        tolerance: f64,
    ) -> Option<(EntityId, ResizeHandle)> {
        let selected = self.selected_id.as_ref()?;
        let entity = entities.iter().find(|e| &e.id == selected && !e.hidden)?;
        ResizeHandle::ALL
            .iter()
            .copied()
            .find(|handle| {
                let p = handle.position(&entity.rect);
                (p.x - point.x).abs() <= tolerance && (p.y - point.y).abs() <= tolerance
            })
            .map(|handle| (entity.id.clone(), handle))
    }

    /// Drops the selection if it points at an entity that no longer exists
    /// or is hidden.
    pub fn prune(&mut self, entities: &[Entity]) {
        if let Some(id) = &self.selected_id {
            if !entities.iter().any(|e| &e.id == id && !e.hidden) {
                self.selected_id = None;
            }
        }
    }
}

//! Versioned entity store.
//!
//! Owns the spatial entities and hands out immutable, version-stamped
//! snapshots. Every successful write produces a new snapshot; readers holding
//! an older one keep seeing a consistent view.
//!
//! While a gesture holds an entity, writes to its geometry from anywhere other
//! than the gesture itself are rejected with [`StoreError::Locked`].

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stagekit_core::{CanvasSize, Entity, EntityId, Rect, SlotKey, StoreError};

/// Immutable view of the entity collection at one version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    version: u64,
    canvas: CanvasSize,
    entities: Vec<Entity>,
}

impl EntitySnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn visible(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.hidden)
    }

    /// The non-hidden entity holding `slot_key`, if any.
    pub fn slot_holder(&self, slot_key: &SlotKey) -> Option<&Entity> {
        self.visible()
            .find(|e| e.slot_key.as_ref() == Some(slot_key))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn position(&self, id: &EntityId) -> Option<usize> {
        self.entities.iter().position(|e| &e.id == id)
    }
}

/// Owner of the entity collection.
#[derive(Debug, Clone)]
pub struct EntityStore {
    current: Arc<EntitySnapshot>,
    /// Geometry as canvas fractions, kept for re-projection on resize.
    normalized: HashMap<EntityId, Rect>,
    locked: Option<EntityId>,
}

impl EntityStore {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            current: Arc::new(EntitySnapshot {
                version: 0,
                canvas,
                entities: Vec::new(),
            }),
            normalized: HashMap::new(),
            locked: None,
        }
    }

    /// Builds a store from existing records, enforcing id and slot uniqueness.
    pub fn from_entities(
        canvas: CanvasSize,
        entities: impl IntoIterator<Item = Entity>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new(canvas);
        for entity in entities {
            store.insert(entity)?;
        }
        Ok(store)
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<EntitySnapshot> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn canvas(&self) -> CanvasSize {
        self.current.canvas
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.current.get(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.current.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Entity currently held by a gesture.
    pub fn locked(&self) -> Option<&EntityId> {
        self.locked.as_ref()
    }

    /// Adds `entity`. Fails on a duplicate id or when a visible entity already
    /// holds the same slot.
    pub fn insert(&mut self, mut entity: Entity) -> Result<Arc<EntitySnapshot>, StoreError> {
        if self.contains(&entity.id) {
            return Err(StoreError::DuplicateId {
                id: entity.id.to_string(),
            });
        }
        if !entity.hidden {
            self.check_slot_free(&entity.id, entity.slot_key.as_ref())?;
        }

        entity.rect = entity.rect.sanitized();
        self.normalized
            .insert(entity.id.clone(), entity.rect.normalized(self.canvas()));
        tracing::debug!("Inserted entity {} at {}", entity.id, entity.rect);
        Ok(self.commit(|snap| snap.entities.push(entity)))
    }

    /// Removes an entity. An entity held by a gesture cannot be removed.
    pub fn remove(&mut self, id: &EntityId) -> Result<(Entity, Arc<EntitySnapshot>), StoreError> {
        self.check_unlocked(id)?;
        let index = self.index_of(id)?;
        self.normalized.remove(id);
        let mut removed = None;
        let snapshot = self.commit(|snap| removed = Some(snap.entities.remove(index)));
        match removed {
            Some(entity) => {
                tracing::debug!("Removed entity {}", entity.id);
                Ok((entity, snapshot))
            }
            None => Err(StoreError::UnknownEntity { id: id.to_string() }),
        }
    }

    /// Shows or hides an entity. Un-hiding is refused if its slot has been
    /// taken by another visible entity in the meantime.
    pub fn set_hidden(
        &mut self,
        id: &EntityId,
        hidden: bool,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        if let Err(err) = self.check_unlocked(id) {
            tracing::warn!("Rejected visibility change of {}: held by a gesture", id);
            return Err(err);
        }
        let index = self.index_of(id)?;
        if !hidden {
            let slot = self.current.entities[index].slot_key.clone();
            self.check_slot_free(id, slot.as_ref())?;
        }
        Ok(self.commit(|snap| snap.entities[index].hidden = hidden))
    }

    /// Writes geometry from outside a gesture (e.g. a property panel).
    pub fn set_geometry(
        &mut self,
        id: &EntityId,
        rect: Rect,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        if let Err(err) = self.check_unlocked(id) {
            tracing::warn!("Rejected geometry write to {}: held by a gesture", id);
            return Err(err);
        }
        self.write_geometry(id, rect)
    }

    pub fn set_z_index(
        &mut self,
        id: &EntityId,
        z_index: i32,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        let index = self.index_of(id)?;
        Ok(self.commit(|snap| snap.entities[index].z_index = z_index))
    }

    /// Replaces the opaque content metadata.
    pub fn set_content(
        &mut self,
        id: &EntityId,
        content: serde_json::Value,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        let index = self.index_of(id)?;
        Ok(self.commit(|snap| snap.entities[index].content = content))
    }

    /// Marks `id` as held by a gesture.
    pub fn lock(&mut self, id: &EntityId) -> Result<(), StoreError> {
        self.index_of(id)?;
        match &self.locked {
            Some(holder) if holder != id => Err(StoreError::Locked {
                id: holder.to_string(),
            }),
            _ => {
                self.locked = Some(id.clone());
                Ok(())
            }
        }
    }

    pub fn unlock(&mut self) {
        self.locked = None;
    }

    /// Geometry write from the gesture holding `id`.
    pub fn apply_gesture_frame(
        &mut self,
        id: &EntityId,
        rect: Rect,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        if self.locked.as_ref() != Some(id) {
            return Err(StoreError::Locked { id: id.to_string() });
        }
        self.write_geometry(id, rect)
    }

    /// Re-projects every entity onto a new logical resolution, preserving
    /// each one's position and size as fractions of the canvas.
    pub fn rescale(&mut self, canvas: CanvasSize) -> Arc<EntitySnapshot> {
        self.rescale_with(canvas, |_, rect| rect)
    }

    /// Like [`rescale`](Self::rescale), passing each re-projected rect
    /// through `adjust` before it is stored. The normalized fractions are
    /// kept, so scaling back up restores the original geometry.
    pub fn rescale_with(
        &mut self,
        canvas: CanvasSize,
        adjust: impl Fn(&Entity, Rect) -> Rect,
    ) -> Arc<EntitySnapshot> {
        let old = self.canvas();
        let rects: Vec<Rect> = self
            .current
            .entities
            .iter()
            .map(|entity| {
                let projected = self
                    .normalized
                    .get(&entity.id)
                    .copied()
                    .unwrap_or_else(|| entity.rect.normalized(old))
                    .denormalized(canvas);
                adjust(entity, projected).sanitized()
            })
            .collect();
        let snapshot = self.commit(|snap| {
            snap.canvas = canvas;
            for (entity, rect) in snap.entities.iter_mut().zip(rects) {
                entity.rect = rect;
            }
        });
        tracing::debug!(
            "Rescaled {} entities from {}x{} to {}x{}",
            snapshot.len(),
            old.w,
            old.h,
            canvas.w,
            canvas.h
        );
        snapshot
    }

    fn write_geometry(
        &mut self,
        id: &EntityId,
        rect: Rect,
    ) -> Result<Arc<EntitySnapshot>, StoreError> {
        let index = self.index_of(id)?;
        let rect = rect.sanitized();
        self.normalized
            .insert(id.clone(), rect.normalized(self.canvas()));
        Ok(self.commit(|snap| snap.entities[index].rect = rect))
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut EntitySnapshot)) -> Arc<EntitySnapshot> {
        let snap = Arc::make_mut(&mut self.current);
        mutate(snap);
        snap.version += 1;
        Arc::clone(&self.current)
    }

    fn index_of(&self, id: &EntityId) -> Result<usize, StoreError> {
        self.current
            .position(id)
            .ok_or_else(|| StoreError::UnknownEntity { id: id.to_string() })
    }

    fn check_unlocked(&self, id: &EntityId) -> Result<(), StoreError> {
        match &self.locked {
            Some(holder) if holder == id => Err(StoreError::Locked { id: id.to_string() }),
            _ => Ok(()),
        }
    }

    fn check_slot_free(&self, id: &EntityId, slot: Option<&SlotKey>) -> Result<(), StoreError> {
        let Some(slot) = slot else {
            return Ok(());
        };
        match self.current.slot_holder(slot) {
            Some(holder) if &holder.id != id => {
                tracing::warn!("Slot {} already held by {}", slot, holder.id);
                Err(StoreError::SlotOccupied {
                    slot_key: slot.to_string(),
                    holder: holder.id.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

use stagekit_core::{CanvasSize, Entity, EntityId, Rect, RowRole, SlotKey, StoreError};
use stagekit_layout::entity_store::EntityStore;

fn hd() -> CanvasSize {
    CanvasSize::new(1920.0, 1080.0)
}

fn slotted(id: &str, key: &str) -> Entity {
    Entity::new(id, Rect::new(0.0, 0.0, 100.0, 100.0), RowRole::Text).with_slot(SlotKey(key.into()))
}

#[test]
fn test_snapshots_are_immutable_and_versioned() {
    let mut store = EntityStore::new(hd());
    let before = store.snapshot();
    let after = store
        .insert(Entity::new("a", Rect::new(1.0, 2.0, 30.0, 40.0), RowRole::Text))
        .unwrap();

    assert!(before.is_empty());
    assert_eq!(after.len(), 1);
    assert!(after.version() > before.version());
    assert_eq!(store.version(), after.version());
}

#[test]
fn test_duplicate_id_rejected() {
    let mut store = EntityStore::new(hd());
    store.insert(slotted("a", "full_text")).unwrap();
    let err = store.insert(slotted("a", "high_text")).unwrap_err();
    assert_eq!(err, StoreError::DuplicateId { id: "a".into() });
}

#[test]
fn test_visible_slot_is_exclusive() {
    let mut store = EntityStore::new(hd());
    store.insert(slotted("a", "mid_bg")).unwrap();
    assert!(matches!(
        store.insert(slotted("b", "mid_bg")),
        Err(StoreError::SlotOccupied { .. })
    ));

    // A hidden entity does not hold its slot.
    store.set_hidden(&EntityId::new("a"), true).unwrap();
    store.insert(slotted("b", "mid_bg")).unwrap();
    assert!(matches!(
        store.set_hidden(&EntityId::new("a"), false),
        Err(StoreError::SlotOccupied { .. })
    ));
}

#[test]
fn test_lock_blocks_external_writes() {
    let mut store = EntityStore::new(hd());
    store.insert(slotted("a", "full_text")).unwrap();
    let id = EntityId::new("a");
    store.lock(&id).unwrap();

    assert!(matches!(
        store.set_geometry(&id, Rect::new(5.0, 5.0, 50.0, 50.0)),
        Err(StoreError::Locked { .. })
    ));
    assert!(matches!(store.remove(&id), Err(StoreError::Locked { .. })));

    let snap = store
        .apply_gesture_frame(&id, Rect::new(5.0, 5.0, 50.0, 50.0))
        .unwrap();
    assert_eq!(snap.get(&id).unwrap().rect, Rect::new(5.0, 5.0, 50.0, 50.0));

    store.unlock();
    store.set_geometry(&id, Rect::new(6.0, 6.0, 50.0, 50.0)).unwrap();
    assert!(store.apply_gesture_frame(&id, Rect::new(0.0, 0.0, 1.0, 1.0)).is_err());
}

#[test]
fn test_rescale_preserves_proportions() {
    let mut store = EntityStore::new(hd());
    store
        .insert(Entity::new("a", Rect::new(480.0, 270.0, 960.0, 540.0), RowRole::Text))
        .unwrap();
    let snap = store.rescale(CanvasSize::new(1280.0, 720.0));
    let r = snap.get(&EntityId::new("a")).unwrap().rect;
    assert!((r.x - 320.0).abs() < 1e-9);
    assert!((r.y - 180.0).abs() < 1e-9);
    assert!((r.w - 640.0).abs() < 1e-9);
    assert!((r.h - 360.0).abs() < 1e-9);
    assert_eq!(snap.canvas(), CanvasSize::new(1280.0, 720.0));
}

#[test]
fn test_snapshot_serializes_entities() {
    let store = EntityStore::from_entities(hd(), [slotted("a", "full_text")]).unwrap();
    let json = serde_json::to_value(&*store.snapshot()).unwrap();
    assert_eq!(json["entities"][0]["id"], "a");
    assert_eq!(json["entities"][0]["slot_key"], "full_text");
}

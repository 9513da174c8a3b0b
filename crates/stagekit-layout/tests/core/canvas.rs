use std::rc::Rc;

use stagekit_core::{
    shared, CanvasSize, ClipKind, ColRole, Entity, EntityId, Error, GestureError,
    InteractionConfig, Point, Rect, RowRole, StoreError,
};
use stagekit_layout::{Canvas, DragMode, HitTarget, ResizeHandle, SlotActivation};

fn hd() -> CanvasSize {
    CanvasSize::new(1920.0, 1080.0)
}

fn canvas() -> Canvas {
    Canvas::new(hd(), InteractionConfig::default())
}

fn created(activation: SlotActivation) -> EntityId {
    match activation {
        SlotActivation::Created(id) => id,
        other => panic!("expected a new entity, got {:?}", other),
    }
}

#[test]
fn test_body_press_selects_and_moves() {
    let mut canvas = canvas();
    canvas
        .insert_entity(Entity::new("a", Rect::new(100.0, 100.0, 200.0, 200.0), RowRole::Text))
        .unwrap();

    let target = canvas.pointer_down(Point::new(200.0, 200.0)).unwrap();
    assert_eq!(target, HitTarget::Body(EntityId::new("a")));
    assert_eq!(canvas.selected_id(), Some(&EntityId::new("a")));
    assert!(canvas.is_dragging());

    canvas.pointer_move(Point::new(250.0, 230.0)).unwrap();
    let outcome = canvas.pointer_up().unwrap().unwrap();
    assert_eq!(outcome.rect, Rect::new(150.0, 130.0, 200.0, 200.0));
    assert!(!canvas.is_dragging());
    assert_eq!(
        canvas.get_entity(&EntityId::new("a")).unwrap().rect,
        outcome.rect
    );
}

#[test]
fn test_handle_press_on_selected_entity_resizes() {
    let mut canvas = canvas();
    let id = created(canvas.activate_slot(2, RowRole::Background).unwrap());

    let target = canvas.pointer_down(Point::new(962.0, 362.0)).unwrap();
    assert_eq!(target, HitTarget::Handle(id.clone(), ResizeHandle::TopMiddle));

    // Upward drags stop at the top of the mid third.
    let frame = canvas.pointer_move(Point::new(962.0, 300.0)).unwrap();
    assert_eq!(frame.rect, Rect::new(0.0, 360.0, 1920.0, 360.0));

    let frame = canvas.pointer_move(Point::new(962.0, 500.0)).unwrap();
    assert_eq!(frame.rect, Rect::new(0.0, 498.0, 1920.0, 222.0));
    canvas.pointer_up().unwrap();
}

#[test]
fn test_commit_listener_sees_every_frame() {
    let versions = shared(Vec::new());
    let sink = Rc::clone(&versions);

    let mut canvas = canvas();
    canvas.set_commit_listener(move |snap| sink.borrow_mut().push(snap.version()));
    canvas
        .insert_entity(Entity::new("a", Rect::new(100.0, 100.0, 200.0, 200.0), RowRole::Text))
        .unwrap();
    canvas.pointer_down(Point::new(150.0, 150.0)).unwrap();
    canvas.pointer_move(Point::new(160.0, 150.0));
    canvas.pointer_move(Point::new(170.0, 150.0));
    canvas.pointer_up().unwrap();

    let seen = versions.borrow();
    assert_eq!(seen.len(), 3);
    assert!(seen.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_writes_to_held_entity_are_refused() {
    let mut canvas = canvas();
    canvas
        .insert_entity(Entity::new("a", Rect::new(100.0, 100.0, 200.0, 200.0), RowRole::Text))
        .unwrap();
    let id = EntityId::new("a");
    canvas.pointer_down(Point::new(150.0, 150.0)).unwrap();

    assert!(canvas.set_entity_geometry(&id, Rect::new(0.0, 0.0, 50.0, 50.0)).is_err());
    assert!(canvas.remove_entity(&id).is_err());
    assert!(matches!(
        canvas.resize_canvas(CanvasSize::new(1280.0, 720.0)),
        Err(GestureError::AlreadyActive { .. })
    ));
    assert!(matches!(
        canvas.pointer_down(Point::new(150.0, 150.0)),
        Err(Error::Gesture(GestureError::AlreadyActive { .. }))
    ));

    canvas.pointer_up().unwrap();
    canvas.set_entity_geometry(&id, Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
}

#[test]
fn test_external_geometry_is_constrained() {
    let mut canvas = canvas();
    let entity = Entity::new("low", Rect::new(0.0, 720.0, 400.0, 200.0), RowRole::Background)
        .with_col_role(ColRole::Low);
    canvas.insert_entity(entity).unwrap();

    let snap = canvas
        .set_entity_geometry(&EntityId::new("low"), Rect::new(0.0, 100.0, 400.0, 200.0))
        .unwrap();
    assert_eq!(snap.get(&EntityId::new("low")).unwrap().rect.y, 720.0);

    let snap = canvas
        .set_entity_geometry(&EntityId::new("low"), Rect::new(0.0, 700.0, 2.0, 2.0))
        .unwrap();
    let r = snap.get(&EntityId::new("low")).unwrap().rect;
    assert_eq!((r.y, r.w, r.h), (720.0, 10.0, 10.0));
}

#[test]
fn test_remove_and_hide_clear_selection() {
    let mut canvas = canvas();
    let id = created(canvas.activate_slot(1, RowRole::Text).unwrap());
    assert_eq!(canvas.selected_id(), Some(&id));
    canvas.set_hidden(&id, true).unwrap();
    assert_eq!(canvas.selected_id(), None);

    canvas.set_hidden(&id, false).unwrap();
    canvas.selection_manager.select(id.clone());
    canvas.remove_entity(&id).unwrap();
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(canvas.entity_count(), 0);
}

#[test]
fn test_hidden_entities_are_not_hit() {
    let mut canvas = canvas();
    let mut entity = Entity::new("a", Rect::new(0.0, 0.0, 100.0, 100.0), RowRole::Text);
    entity.hidden = true;
    canvas.insert_entity(entity).unwrap();
    assert_eq!(
        canvas.pointer_down(Point::new(50.0, 50.0)).unwrap(),
        HitTarget::Background
    );
}

#[test]
fn test_topmost_entity_wins_hit_test() {
    let mut canvas = canvas();
    canvas
        .insert_entity(
            Entity::new("over", Rect::new(0.0, 0.0, 100.0, 100.0), RowRole::Effect).with_z_index(180),
        )
        .unwrap();
    canvas
        .insert_entity(
            Entity::new("under", Rect::new(0.0, 0.0, 100.0, 100.0), RowRole::Background)
                .with_z_index(120),
        )
        .unwrap();
    assert_eq!(
        canvas.hit_target_at(Point::new(50.0, 50.0), 0.0),
        HitTarget::Body(EntityId::new("over"))
    );
}

#[test]
fn test_multi_asset_drop_cascades() {
    let mut canvas = canvas();
    let ids = canvas
        .drop_assets(&[ClipKind::Image, ClipKind::Video, ClipKind::Sound], Point::new(500.0, 400.0))
        .unwrap();
    assert_eq!(ids.len(), 3);

    let rects: Vec<Rect> = ids.iter().map(|id| canvas.get_entity(id).unwrap().rect).collect();
    assert_eq!(rects[0], Rect::new(20.0, 130.0, 960.0, 540.0));
    assert_eq!(rects[1], Rect::new(70.0, 180.0, 960.0, 540.0));
    assert_eq!(rects[2], Rect::new(120.0, 230.0, 960.0, 540.0));
    assert_eq!(canvas.get_entity(&ids[2]).unwrap().row_role, RowRole::Effect);
}

#[test]
fn test_resize_canvas_rescales_entities() {
    let mut canvas = canvas();
    canvas
        .insert_entity(Entity::new("a", Rect::new(960.0, 540.0, 192.0, 108.0), RowRole::Text))
        .unwrap();
    canvas.resize_canvas(CanvasSize::new(960.0, 540.0)).unwrap();
    let r = canvas.get_entity(&EntityId::new("a")).unwrap().rect;
    assert!((r.x - 480.0).abs() < 1e-9);
    assert!((r.y - 270.0).abs() < 1e-9);
    assert!((r.w - 96.0).abs() < 1e-9);
    assert!((r.h - 54.0).abs() < 1e-9);
    assert_eq!(canvas.canvas_size(), CanvasSize::new(960.0, 540.0));
}

#[test]
fn test_resize_canvas_keeps_min_size() {
    let mut canvas = canvas();
    canvas
        .insert_entity(Entity::new("small", Rect::new(100.0, 100.0, 12.0, 12.0), RowRole::Text))
        .unwrap();
    canvas
        .insert_entity(Entity::new("edge", Rect::new(1908.0, 1068.0, 12.0, 12.0), RowRole::Effect))
        .unwrap();
    canvas.resize_canvas(CanvasSize::new(960.0, 540.0)).unwrap();

    let small = canvas.get_entity(&EntityId::new("small")).unwrap().rect;
    assert!((small.x - 50.0).abs() < 1e-9);
    assert!((small.y - 50.0).abs() < 1e-9);
    assert_eq!((small.w, small.h), (10.0, 10.0));
    // Grown to the minimum size and pushed back inside the canvas.
    let edge = canvas.get_entity(&EntityId::new("edge")).unwrap().rect;
    assert_eq!(edge, Rect::new(950.0, 530.0, 10.0, 10.0));

    canvas.resize_canvas(hd()).unwrap();
    let small = canvas.get_entity(&EntityId::new("small")).unwrap().rect;
    assert!((small.x - 100.0).abs() < 1e-9);
    assert!((small.w - 12.0).abs() < 1e-9);
}

#[test]
fn test_resize_canvas_keeps_background_in_its_third() {
    let mut canvas = canvas();
    let bg = Entity::new("bg", Rect::new(0.0, 360.0, 1920.0, 360.0), RowRole::Background)
        .with_col_role(ColRole::Mid);
    canvas.insert_entity(bg).unwrap();
    canvas.resize_canvas(CanvasSize::new(30.0, 30.0)).unwrap();

    // The middle third is 10 high, exactly the minimum size.
    let r = canvas.get_entity(&EntityId::new("bg")).unwrap().rect;
    assert!((r.y - 10.0).abs() < 1e-9);
    assert!((r.h - 10.0).abs() < 1e-9);
}

#[test]
fn test_set_hidden_refused_during_drag() {
    let mut canvas = canvas();
    canvas
        .insert_entity(Entity::new("a", Rect::new(100.0, 100.0, 200.0, 200.0), RowRole::Text))
        .unwrap();
    let id = EntityId::new("a");
    canvas.begin_drag(&id, DragMode::Move, Point::new(150.0, 150.0)).unwrap();

    assert!(matches!(canvas.set_hidden(&id, true), Err(StoreError::Locked { .. })));
    assert!(!canvas.get_entity(&id).unwrap().hidden);

    canvas.end_drag().unwrap();
    assert!(canvas.set_hidden(&id, true).unwrap().get(&id).unwrap().hidden);
}

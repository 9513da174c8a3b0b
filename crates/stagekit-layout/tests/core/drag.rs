use std::time::{Duration, Instant};

use stagekit_core::{
    CanvasSize, ColRole, Edge, Entity, GestureError, InteractionConfig, Point, Rect, RowRole,
};
use stagekit_layout::drag::{resize_rect, DragController, DragMode, DragState, ResizeHandle};

fn hd() -> CanvasSize {
    CanvasSize::new(1920.0, 1080.0)
}

fn controller() -> DragController {
    DragController::new(hd(), InteractionConfig::default())
}

#[test]
fn test_move_uses_total_delta_from_start() {
    let entity = Entity::new("a", Rect::new(100.0, 100.0, 100.0, 100.0), RowRole::Text);
    let entities = vec![entity.clone()];
    let mut drag = controller();
    drag.begin_drag(&entity, DragMode::Move, Point::new(150.0, 150.0))
        .unwrap();

    // Many small moves end where one big move would.
    for step in 1..=10 {
        let x = 150.0 + step as f64 * 7.3;
        drag.update_drag(Point::new(x, 150.0), &entities);
    }
    let frame = drag.update_drag(Point::new(223.0, 150.0), &entities).unwrap();
    assert!((frame.rect.x - 173.0).abs() < 1e-9, "x should be 173, got {}", frame.rect.x);

    let outcome = drag.end_drag().unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.rect, frame.rect);
    assert_eq!(*drag.state(), DragState::Idle);
}

#[test]
fn test_move_is_clamped_to_canvas() {
    let entity = Entity::new("a", Rect::new(100.0, 100.0, 300.0, 200.0), RowRole::Text);
    let mut drag = controller();
    drag.begin_drag(&entity, DragMode::Move, Point::new(0.0, 0.0))
        .unwrap();
    let frame = drag.update_drag(Point::new(5000.0, -5000.0), &[]).unwrap();
    assert_eq!(frame.rect, Rect::new(1620.0, 0.0, 300.0, 200.0));
}

#[test]
fn test_second_begin_is_rejected() {
    let a = Entity::new("a", Rect::new(0.0, 0.0, 50.0, 50.0), RowRole::Text);
    let b = Entity::new("b", Rect::new(100.0, 0.0, 50.0, 50.0), RowRole::Text);
    let mut drag = controller();
    drag.begin_drag(&a, DragMode::Move, Point::new(0.0, 0.0)).unwrap();
    let err = drag
        .begin_drag(&b, DragMode::Move, Point::new(0.0, 0.0))
        .unwrap_err();
    assert_eq!(err, GestureError::AlreadyActive { id: "a".into() });
}

#[test]
fn test_end_without_begin() {
    let mut drag = controller();
    assert_eq!(drag.end_drag().unwrap_err(), GestureError::NotActive);
    assert!(drag.update_drag(Point::new(1.0, 1.0), &[]).is_none());
}

#[test]
fn test_hidden_entity_cannot_be_dragged() {
    let mut entity = Entity::new("a", Rect::new(0.0, 0.0, 50.0, 50.0), RowRole::Text);
    entity.hidden = true;
    let mut drag = controller();
    assert!(matches!(
        drag.begin_drag(&entity, DragMode::Move, Point::new(0.0, 0.0)),
        Err(GestureError::Hidden { .. })
    ));
}

#[test]
fn test_each_handle_owns_its_edges() {
    let start = Rect::new(100.0, 100.0, 200.0, 100.0);
    let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let cases = [
        (ResizeHandle::TopLeft, Rect::new(90.0, 90.0, 210.0, 110.0)),
        (ResizeHandle::TopMiddle, Rect::new(100.0, 90.0, 200.0, 110.0)),
        (ResizeHandle::TopRight, Rect::new(100.0, 90.0, 190.0, 110.0)),
        (ResizeHandle::MiddleLeft, Rect::new(90.0, 100.0, 210.0, 100.0)),
        (ResizeHandle::MiddleRight, Rect::new(100.0, 100.0, 190.0, 100.0)),
        (ResizeHandle::BottomLeft, Rect::new(90.0, 100.0, 210.0, 90.0)),
        (ResizeHandle::BottomMiddle, Rect::new(100.0, 100.0, 200.0, 90.0)),
        (ResizeHandle::BottomRight, Rect::new(100.0, 100.0, 190.0, 90.0)),
    ];
    for (handle, expected) in cases {
        let r = resize_rect(start, handle, -10.0, -10.0, bounds, 10.0);
        assert_eq!(r, expected, "handle {}", handle);
    }
}

#[test]
fn test_resize_stops_at_region_and_min_size() {
    let bounds = Rect::new(0.0, 360.0, 1920.0, 360.0);
    let start = Rect::new(0.0, 400.0, 500.0, 200.0);

    let r = resize_rect(start, ResizeHandle::TopMiddle, 0.0, -200.0, bounds, 10.0);
    assert_eq!(r, Rect::new(0.0, 360.0, 500.0, 240.0));

    let r = resize_rect(start, ResizeHandle::MiddleRight, -900.0, 0.0, bounds, 10.0);
    assert_eq!(r, Rect::new(0.0, 400.0, 10.0, 200.0));
}

#[test]
fn test_edge_contact_lights_and_flash_expires() {
    let entity = Entity::new("a", Rect::new(0.0, 400.0, 500.0, 200.0), RowRole::Background)
        .with_col_role(ColRole::Mid);
    let mut drag = controller();
    let t0 = Instant::now();
    drag.begin_drag(&entity, DragMode::Move, Point::new(0.0, 0.0))
        .unwrap();

    let frame = drag
        .update_drag_at(Point::new(0.0, -100.0), &[], t0)
        .unwrap();
    assert_eq!(frame.rect.y, 360.0);
    assert!(frame.lit_edges.contains(&Edge::Top));
    assert!(frame.lit_edges.contains(&Edge::Left));

    // Still touching, but past the flash window.
    let frame = drag
        .update_drag_at(Point::new(0.0, -100.0), &[], t0 + Duration::from_millis(600))
        .unwrap();
    assert!(frame.lit_edges.is_empty());
}

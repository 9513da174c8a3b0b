use std::cell::RefCell;
use std::rc::Rc;

use stagekit_core::{CanvasSize, Entity, InteractionConfig, Point, Rect, RowRole};
use stagekit_layout::viewport::{CoordinateSpace, FixedViewport, RenderedRect};
use stagekit_layout::Canvas;

fn hd() -> CanvasSize {
    CanvasSize::new(1920.0, 1080.0)
}

#[test]
fn test_fit_letterboxes_wide_canvas() {
    let space = CoordinateSpace::fit(1000.0, 1000.0, hd(), 20.0);
    let r = space.rendered_rect();
    assert!((r.width - 980.0).abs() < 1e-9);
    assert!((r.height - 551.25).abs() < 1e-9);
    assert!((r.left - 10.0).abs() < 1e-9);
    assert!((r.top - 224.375).abs() < 1e-9);
}

#[test]
fn test_screen_logical_round_trip() {
    let space = CoordinateSpace::new(RenderedRect::new(10.0, 20.0, 960.0, 540.0), hd());
    let logical = space.to_logical(Point::new(490.0, 290.0));
    assert_eq!(logical, Point::new(960.0, 540.0));
    assert_eq!(space.to_screen(logical), Point::new(490.0, 290.0));
    assert_eq!(space.length_to_logical(6.0), 12.0);
}

#[test]
fn test_zero_width_viewport_uses_unit_scale() {
    let space = CoordinateSpace::new(RenderedRect::new(5.0, 5.0, 0.0, 0.0), hd());
    assert_eq!(space.scale(), 1.0);
    assert_eq!(space.to_logical(Point::new(15.0, 25.0)), Point::new(10.0, 20.0));
}

#[test]
fn test_gesture_keeps_space_captured_at_start() {
    let viewport = Rc::new(RefCell::new(FixedViewport::new(RenderedRect::new(
        100.0, 50.0, 960.0, 540.0,
    ))));
    let mut canvas = Canvas::with_viewport(hd(), InteractionConfig::default(), Rc::clone(&viewport));
    canvas
        .insert_entity(Entity::new("a", Rect::new(500.0, 500.0, 400.0, 300.0), RowRole::Text))
        .unwrap();

    // Center of the entity on screen at half scale.
    canvas.pointer_down(Point::new(450.0, 375.0)).unwrap();

    // The host re-lays out mid-gesture; the running drag must not notice.
    viewport
        .borrow_mut()
        .set_rect(RenderedRect::new(0.0, 0.0, 1920.0, 1080.0));

    let frame = canvas.pointer_move(Point::new(460.0, 375.0)).unwrap();
    assert_eq!(frame.rect, Rect::new(520.0, 500.0, 400.0, 300.0));
    canvas.pointer_up().unwrap();

    // The next gesture picks up the new layout.
    let space = canvas.coordinate_space();
    assert_eq!(space.scale(), 1.0);
}

use proptest::prelude::*;
use stagekit_core::{CanvasSize, Rect};

#[test]
fn test_rect_within_canvas() {
    let size = CanvasSize::default();
    assert!(Rect::new(0.0, 0.0, 1920.0, 1080.0).within(size, 0.0));
    assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).within(size, 0.0));
    assert!(Rect::new(-0.5, 0.0, 10.0, 10.0).within(size, 1.0));
    assert!(!Rect::new(1900.0, 0.0, 30.0, 10.0).within(size, 1.0));
}

proptest! {
    #[test]
    fn normalized_geometry_round_trips(
        x in 0.0f64..1920.0,
        y in 0.0f64..1080.0,
        w in 10.0f64..1920.0,
        h in 10.0f64..1080.0,
    ) {
        let size = CanvasSize::default();
        let r = Rect::new(x, y, w, h);
        let back = r.normalized(size).denormalized(size);
        prop_assert!((back.x - r.x).abs() < 1e-6);
        prop_assert!((back.y - r.y).abs() < 1e-6);
        prop_assert!((back.w - r.w).abs() < 1e-6);
        prop_assert!((back.h - r.h).abs() < 1e-6);
    }
}

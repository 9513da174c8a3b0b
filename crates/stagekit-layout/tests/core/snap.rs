use stagekit_core::{CanvasSize, Entity, EntityId, InteractionConfig, Rect, RowRole};
use stagekit_layout::snap::{snap, SnapLines, SnapResolver};

fn hd() -> CanvasSize {
    CanvasSize::new(1920.0, 1080.0)
}

fn boxed(id: &str, rect: Rect) -> Entity {
    Entity::new(id, rect, RowRole::Text)
}

#[test]
fn test_center_snaps_to_canvas_center() {
    let resolver = SnapResolver::default();
    let moving = EntityId::new("a");
    let result = resolver.snap(&moving, Rect::new(762.0, 388.0, 400.0, 300.0), &[], hd());
    assert_eq!(result.rect, Rect::new(760.0, 390.0, 400.0, 300.0));
    assert_eq!(result.guide_x, Some(960.0));
    assert_eq!(result.guide_y, Some(540.0));
}

#[test]
fn test_trailing_edge_snaps_to_sibling_leading_edge() {
    let entities = vec![
        boxed("a", Rect::new(0.0, 0.0, 100.0, 100.0)),
        boxed("b", Rect::new(300.0, 200.0, 100.0, 100.0)),
    ];
    let result = SnapResolver::default().snap(
        &EntityId::new("a"),
        Rect::new(195.0, 420.0, 100.0, 100.0),
        &entities,
        hd(),
    );
    assert_eq!(result.rect.x, 200.0);
    assert!(result.snapped_x);
    assert!(!result.snapped_y, "y=420 is not near any line");
}

#[test]
fn test_hidden_and_moving_entities_are_not_candidates() {
    let mut hidden = boxed("h", Rect::new(300.0, 300.0, 50.0, 50.0));
    hidden.hidden = true;
    let moving = boxed("a", Rect::new(305.0, 305.0, 50.0, 50.0));
    let lines = SnapLines::collect(&moving.id, [&hidden, &moving], hd());
    assert_eq!(lines, SnapLines::for_canvas(hd()));
}

#[test]
fn test_magnet_off_is_passthrough() {
    let config = InteractionConfig {
        magnet: false,
        ..InteractionConfig::default()
    };
    let rect = Rect::new(3.0, 538.0, 100.0, 4.0);
    let result = snap(&EntityId::new("a"), rect, &[], hd(), &config);
    assert_eq!(result.rect, rect);
    assert!(!result.snapped_x && !result.snapped_y);
}

#[test]
fn test_snapping_is_idempotent() {
    let resolver = SnapResolver::new(true, 15.0);
    let others = vec![boxed("b", Rect::new(400.0, 400.0, 37.0, 91.0))];
    let id = EntityId::new("a");
    let once = resolver.snap(&id, Rect::new(428.0, 480.0, 20.0, 20.0), &others, hd());
    let twice = resolver.snap(&id, once.rect, &others, hd());
    assert_eq!(once.rect, twice.rect);
}

use stagekit_core::{
    CanvasSize, Clip, ClipId, ClipKind, Entity, EntityId, InteractionConfig, Point, Rect, RowRole,
    Track, TrackKind,
};
use stagekit_layout::{compose_stack, Canvas, LayerSource, Timeline};

fn timeline() -> Timeline {
    let mut tl = Timeline::default();
    tl.add_track(Track::new("top", TrackKind::Video)).unwrap();
    tl.add_track(Track::new("bottom", TrackKind::Video)).unwrap();
    tl.add_clip(Clip::new("t", "top", 0.0, 10.0, ClipKind::Video)).unwrap();
    tl.add_clip(Clip::new("b", "bottom", 0.0, 10.0, ClipKind::Image)).unwrap();
    tl
}

#[test]
fn test_first_track_stacks_on_top_and_layers_above_clips() {
    let tl = timeline();
    let hd = CanvasSize::new(1920.0, 1080.0);
    let entities = vec![
        Entity::new("e", Rect::new(0.0, 0.0, 10.0, 10.0), RowRole::Text).with_z_index(140),
    ];
    let stack = compose_stack(&tl.snapshot(), &entities, hd, 1.0);

    let sources: Vec<LayerSource> = stack.iter().map(|e| e.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            LayerSource::Clip(ClipId::new("b")),
            LayerSource::Clip(ClipId::new("t")),
            LayerSource::Entity(EntityId::new("e")),
        ]
    );
    assert_eq!(stack[0].z_index, 100);
    assert_eq!(stack[1].z_index, 200);
    assert_eq!(stack[2].z_index, 140 + 200 + 100);
    assert_eq!(stack[0].rect, Rect::from_canvas(hd));
}

#[test]
fn test_stack_at_playhead_from_canvas() {
    let mut tl = timeline();
    tl.set_playhead(12.0);
    let mut canvas = Canvas::new(CanvasSize::new(1920.0, 1080.0), InteractionConfig::default());
    canvas
        .drop_asset(ClipKind::Image, Point::new(960.0, 540.0), 0)
        .unwrap();

    let stack = canvas.compose(&tl.snapshot());
    assert_eq!(stack.len(), 1, "no clip is active past its end");
    assert_eq!(stack[0].z_index, 100 + 100);
}

#[test]
fn test_stack_entry_json_shape() {
    let tl = timeline();
    let stack = compose_stack(&tl.snapshot(), &[], CanvasSize::default(), 0.0);
    let json = serde_json::to_value(&stack[0]).unwrap();
    assert_eq!(json["source"], "clip");
    assert_eq!(json["id"], "b");
    assert_eq!(json["z_index"], 100);
}

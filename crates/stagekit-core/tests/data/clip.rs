use stagekit_core::{Clip, ClipKind, Track, TrackKind};

#[test]
fn test_clip_json_round_trip_keeps_timing() {
    let clip = Clip::new("c_1", "v1", 12.5, 3.0, ClipKind::Sound);
    let json = serde_json::to_string(&clip).unwrap();
    let back: Clip = serde_json::from_str(&json).unwrap();
    assert_eq!(back, clip);
    assert_eq!(back.end(), 15.5);
}

#[test]
fn test_track_flags_default_off() {
    let t: Track = serde_json::from_str(r#"{ "id": "a1", "kind": "audio" }"#).unwrap();
    assert_eq!(t.kind, TrackKind::Audio);
    assert!(!t.locked);
    assert!(!t.hidden);
}

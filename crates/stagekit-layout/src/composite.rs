//! Composited stacking of timeline clips and canvas layers.
//!
//! Clips active at the playhead become full-canvas layers ordered by track
//! (the first track on top). Canvas entities always stack above every clip.

use serde::{Deserialize, Serialize};
use stagekit_core::constants::{Z_LAYER_ABOVE_CLIPS, Z_TRACK_STEP};
use stagekit_core::{CanvasSize, ClipId, Entity, EntityId, Rect};

use crate::timeline::TimelineSnapshot;

/// What a stack entry was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "lowercase")]
pub enum LayerSource {
    Clip(ClipId),
    Entity(EntityId),
}

/// One layer of the composited frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    #[serde(flatten)]
    pub source: LayerSource,
    pub rect: Rect,
    pub z_index: i32,
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// z-index of a clip on the track at `track_index` out of `track_count`.
pub fn clip_z_index(track_index: usize, track_count: usize) -> i32 {
    to_i32(track_count.saturating_sub(track_index)).saturating_mul(Z_TRACK_STEP)
}

/// Builds the composited stack at `time`, sorted bottom to top.
pub fn compose_stack(
    timeline: &TimelineSnapshot,
    entities: &[Entity],
    canvas: CanvasSize,
    time: f64,
) -> Vec<StackEntry> {
    let track_count = timeline.tracks().len();
    let mut stack: Vec<StackEntry> = timeline
        .active_clips_at(time)
        .into_iter()
        .filter_map(|clip| {
            let index = timeline.track_index(&clip.track_id)?;
            Some(StackEntry {
                source: LayerSource::Clip(clip.id.clone()),
                rect: Rect::from_canvas(canvas),
                z_index: clip_z_index(index, track_count),
            })
        })
        .collect();

    let max_clip_z = stack.iter().map(|e| e.z_index).max().unwrap_or(0);
    let layer_base = max_clip_z.saturating_add(Z_LAYER_ABOVE_CLIPS);

    stack.extend(entities.iter().filter(|e| !e.hidden).map(|e| StackEntry {
        source: LayerSource::Entity(e.id.clone()),
        rect: e.rect,
        z_index: e.z_index.saturating_add(layer_base),
    }));

    stack.sort_by_key(|e| e.z_index);
    stack
}

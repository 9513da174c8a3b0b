//! Interval move/trim for clips.
//!
//! The 1-D counterpart of the spatial drag controller. Pointer positions are
//! timeline pixels (x from time zero, y from the top of the panel including
//! the ruler); deltas are converted to seconds at the zoom captured when the
//! gesture began.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stagekit_core::constants::RULER_HEIGHT_PX;
use stagekit_core::{
    Clip, ClipId, GestureError, Point, Result, StoreError, TimeScale, TimelineConfig, TrackId,
};

use super::TimelineSnapshot;

/// Clip gesture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipDragMode {
    /// Shift the whole interval, possibly across tracks.
    Move,
    /// Drag the left edge: start and duration change, end stays.
    TrimStart,
    /// Drag the right edge: duration changes, start stays.
    TrimEnd,
}

/// Snapshot taken when a clip gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSession {
    pub clip_id: ClipId,
    pub mode: ClipDragMode,
    pub start_clip: Clip,
    pub start_pointer: Point,
    pub scale: TimeScale,
    /// Last timing computed for this gesture.
    pub current: ClipFrame,
}

/// Timing produced by one pointer-move.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipFrame {
    pub clip_id: ClipId,
    pub track_id: TrackId,
    pub start: f64,
    pub duration: f64,
    /// Instant the clip locked to, for guide rendering.
    pub guide: Option<f64>,
}

impl ClipFrame {
    fn of(clip: &Clip) -> Self {
        Self {
            clip_id: clip.id.clone(),
            track_id: clip.track_id.clone(),
            start: clip.start,
            duration: clip.duration,
            guide: None,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Result of ending a clip gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipOutcome {
    pub mode: ClipDragMode,
    pub before: Clip,
    pub frame: ClipFrame,
}

/// Lane under a panel-relative y coordinate, if it is below the ruler.
pub fn lane_at(y: f64, track_height: f64) -> Option<usize> {
    let lane_y = y - RULER_HEIGHT_PX;
    if !(lane_y >= 0.0) || !(track_height > 0.0) {
        return None;
    }
    let lane = (lane_y / track_height).floor();
    if lane.is_finite() {
        Some(lane as usize)
    } else {
        None
    }
}

/// Snap candidates: every other clip's start and end on every track, the
/// track origin, then the playhead.
pub fn snap_candidates(snapshot: &TimelineSnapshot, exclude: Option<&ClipId>) -> SmallVec<[f64; 32]> {
    let mut candidates = SmallVec::new();
    for track in snapshot.tracks() {
        for clip in snapshot.clips_on(&track.id) {
            if Some(&clip.id) == exclude {
                continue;
            }
            candidates.push(clip.start);
            candidates.push(clip.end());
        }
    }
    candidates.push(0.0);
    candidates.push(snapshot.playhead());
    candidates
}

/// First candidate within `threshold` of `time`.
pub fn snap_time(time: f64, candidates: &[f64], threshold: f64) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .find(|c| (time - c).abs() < threshold)
}

/// Nearest candidate within `threshold` of `time`.
pub fn nearest_time(time: f64, candidates: &[f64], threshold: f64) -> Option<f64> {
    candidates
        .iter()
        .copied()
        .filter(|c| (time - c).abs() < threshold)
        .min_by(|a, b| (time - a).abs().total_cmp(&(time - b).abs()))
}

/// Drives one clip gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct TimelineScheduler {
    session: Option<ClipSession>,
}

impl TimelineScheduler {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ClipSession> {
        self.session.as_ref()
    }

    pub fn active_clip(&self) -> Option<&ClipId> {
        self.session.as_ref().map(|s| &s.clip_id)
    }

    /// Starts a gesture on `clip_id`.
    ///
    /// Clips on a locked track cannot be manipulated.
    pub fn begin(
        &mut self,
        snapshot: &TimelineSnapshot,
        clip_id: &ClipId,
        mode: ClipDragMode,
        pointer: Point,
        config: &TimelineConfig,
    ) -> Result<()> {
        if let Some(session) = &self.session {
            return Err(GestureError::AlreadyActive {
                id: session.clip_id.to_string(),
            }
            .into());
        }
        let clip = snapshot.clip(clip_id).ok_or_else(|| StoreError::UnknownClip {
            id: clip_id.to_string(),
        })?;
        if snapshot.track(&clip.track_id).is_some_and(|t| t.locked) {
            tracing::warn!("Clip {} is on locked track {}", clip.id, clip.track_id);
            return Err(GestureError::TrackLocked {
                track: clip.track_id.to_string(),
            }
            .into());
        }

        self.session = Some(ClipSession {
            clip_id: clip.id.clone(),
            mode,
            start_clip: clip.clone(),
            start_pointer: pointer,
            scale: TimeScale::new(config.pixels_per_second),
            current: ClipFrame::of(clip),
        });
        tracing::debug!("Clip drag begin on {} ({:?})", clip.id, mode);
        Ok(())
    }

    /// Computes the clip timing for a new pointer position.
    pub fn update(
        &mut self,
        pointer: Point,
        snapshot: &TimelineSnapshot,
        config: &TimelineConfig,
    ) -> Option<ClipFrame> {
        let session = self.session.as_mut()?;
        let clip = &session.start_clip;
        let dt = session
            .scale
            .px_to_time(pointer.x - session.start_pointer.x);
        let threshold = session.scale.px_to_time(config.snap_pixels);
        let candidates = if config.magnet {
            snap_candidates(snapshot, Some(&session.clip_id))
        } else {
            SmallVec::new()
        };
        let min_duration = config.min_duration;

        let mut frame = ClipFrame::of(clip);
        frame.track_id = session.current.track_id.clone();

        match session.mode {
            ClipDragMode::Move => {
                let mut start = (clip.start + dt).max(0.0);
                let end = start + clip.duration;
                for &c in candidates.iter() {
                    if (start - c).abs() < threshold {
                        start = c;
                        frame.guide = Some(c);
                        break;
                    }
                    if (end - c).abs() < threshold {
                        start = c - clip.duration;
                        frame.guide = Some(c);
                        break;
                    }
                }
                frame.start = start.max(0.0);
                frame.track_id = target_track(snapshot, pointer.y, config, &frame.track_id);
            }
            ClipDragMode::TrimStart => {
                let end = clip.end();
                let mut start = (clip.start + dt).max(0.0);
                if let Some(c) = snap_time(start, &candidates, threshold) {
                    start = c;
                    frame.guide = Some(c);
                }
                if end - start < min_duration {
                    start = (end - min_duration).max(0.0);
                }
                frame.start = start;
                frame.duration = (end - start).max(min_duration);
            }
            ClipDragMode::TrimEnd => {
                let mut end = clip.end() + dt;
                if let Some(c) = snap_time(end, &candidates, threshold) {
                    end = c;
                    frame.guide = Some(c);
                }
                frame.duration = (end - clip.start).max(min_duration);
            }
        }

        tracing::trace!(
            "clip {} -> start {:.3} dur {:.3} on {}",
            frame.clip_id,
            frame.start,
            frame.duration,
            frame.track_id
        );
        session.current = frame.clone();
        Some(frame)
    }

    /// Ends the gesture, returning the last computed timing.
    pub fn end(&mut self) -> std::result::Result<ClipOutcome, GestureError> {
        let session = self.session.take().ok_or(GestureError::NotActive)?;
        tracing::debug!(
            "Clip drag end on {} at {:.3}+{:.3}",
            session.clip_id,
            session.current.start,
            session.current.duration
        );
        Ok(ClipOutcome {
            mode: session.mode,
            before: session.start_clip,
            frame: session.current,
        })
    }
}

/// Track for a move gesture at panel y. Invalid or locked lanes keep `current`.
fn target_track(
    snapshot: &TimelineSnapshot,
    y: f64,
    config: &TimelineConfig,
    current: &TrackId,
) -> TrackId {
    let Some(lane) = lane_at(y, config.track_height) else {
        return current.clone();
    };
    match snapshot.tracks().get(lane) {
        Some(track) if !track.locked => track.id.clone(),
        Some(track) => {
            tracing::warn!("Cross-track move onto locked track {} ignored", track.id);
            current.clone()
        }
        None => current.clone(),
    }
}

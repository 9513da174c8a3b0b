//! Timeline: ordered tracks, clips and the playhead.
//!
//! [`Timeline`] owns the records and publishes immutable, version-stamped
//! [`TimelineSnapshot`]s. Clip gestures run through the embedded
//! [`TimelineScheduler`]; while one is active, external timing writes to the
//! held clip are rejected.

mod scheduler;

pub use scheduler::{
    lane_at, nearest_time, snap_candidates, snap_time, ClipDragMode, ClipFrame, ClipOutcome,
    ClipSession, TimelineScheduler,
};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stagekit_core::{
    Clip, ClipId, ClipKind, Error, GestureError, Point, Result, StoreError, TimeScale,
    TimelineConfig, Track, TrackId,
};

/// Immutable view of the timeline at one version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    version: u64,
    tracks: Vec<Track>,
    clips: Vec<Clip>,
    playhead: f64,
}

impl TimelineSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Tracks in stacking order (index 0 is the topmost lane).
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    pub fn track_index(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn clip(&self, id: &ClipId) -> Option<&Clip> {
        self.clips.iter().find(|c| &c.id == id)
    }

    pub fn clips_on<'a>(&'a self, track: &'a TrackId) -> impl Iterator<Item = &'a Clip> + 'a {
        self.clips.iter().filter(move |c| &c.track_id == track)
    }

    /// Clips with `start <= time < end` on visible tracks, in track order.
    pub fn active_clips_at(&self, time: f64) -> Vec<&Clip> {
        self.tracks
            .iter()
            .filter(|t| !t.hidden)
            .flat_map(|t| self.clips_on(&t.id))
            .filter(|c| c.is_active_at(time))
            .collect()
    }

    /// Pairs of clips that overlap on the same track. Overlap is allowed;
    /// this is for presentation warnings.
    pub fn overlaps(&self) -> Vec<(ClipId, ClipId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.clips.iter().enumerate() {
            for b in &self.clips[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.id.clone(), b.id.clone()));
                }
            }
        }
        pairs
    }

    /// End of the last clip.
    pub fn duration(&self) -> f64 {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }

    fn clip_index(&self, id: &ClipId) -> Option<usize> {
        self.clips.iter().position(|c| &c.id == id)
    }
}

/// Where a dropped asset would land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipPlacement {
    pub track_id: TrackId,
    pub start: f64,
    pub duration: f64,
    pub kind: ClipKind,
}

/// Owner of tracks, clips and the playhead.
#[derive(Debug, Clone)]
pub struct Timeline {
    current: Arc<TimelineSnapshot>,
    config: TimelineConfig,
    scheduler: TimelineScheduler,
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            current: Arc::new(TimelineSnapshot::default()),
            config,
            scheduler: TimelineScheduler::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<TimelineSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TimelineConfig) {
        self.config = config;
    }

    pub fn set_magnet(&mut self, on: bool) {
        self.config.magnet = on;
    }

    pub fn set_ripple(&mut self, on: bool) {
        self.config.ripple = on;
    }

    // ---- zoom ----

    pub fn zoom(&self) -> f64 {
        self.config.pixels_per_second
    }

    /// Sets the zoom, clamped to the configured limits. Returns the new zoom.
    pub fn set_zoom(&mut self, pixels_per_second: f64) -> f64 {
        let zoom = if pixels_per_second.is_finite() {
            pixels_per_second
        } else {
            self.config.pixels_per_second
        };
        self.config.pixels_per_second = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        self.config.pixels_per_second
    }

    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.set_zoom(self.config.pixels_per_second * factor)
    }

    pub fn scale(&self) -> TimeScale {
        TimeScale::new(self.config.pixels_per_second)
    }

    // ---- tracks ----

    pub fn add_track(&mut self, track: Track) -> Result<Arc<TimelineSnapshot>> {
        if self.current.track(&track.id).is_some() {
            return Err(StoreError::DuplicateId {
                id: track.id.to_string(),
            }
            .into());
        }
        tracing::debug!("Added track {} ({:?})", track.id, track.kind);
        Ok(self.commit(|snap| snap.tracks.push(track)))
    }

    /// Removes a track and every clip on it.
    pub fn remove_track(&mut self, id: &TrackId) -> Result<Arc<TimelineSnapshot>> {
        let index = self.track_index(id)?;
        if let Some(session) = self.scheduler.session() {
            if &session.start_clip.track_id == id || &session.current.track_id == id {
                return Err(StoreError::Locked {
                    id: session.clip_id.to_string(),
                }
                .into());
            }
        }
        Ok(self.commit(|snap| {
            let track = snap.tracks.remove(index);
            snap.clips.retain(|c| c.track_id != track.id);
        }))
    }

    /// Moves the track at `from` to position `to`, shifting the ones between.
    pub fn move_track(&mut self, from: usize, to: usize) -> Result<Arc<TimelineSnapshot>> {
        let len = self.current.tracks.len();
        for index in [from, to] {
            if index >= len {
                return Err(StoreError::UnknownTrack {
                    track: index.to_string(),
                }
                .into());
            }
        }
        Ok(self.commit(|snap| {
            let track = snap.tracks.remove(from);
            snap.tracks.insert(to, track);
        }))
    }

    pub fn set_track_locked(&mut self, id: &TrackId, locked: bool) -> Result<Arc<TimelineSnapshot>> {
        let index = self.track_index(id)?;
        Ok(self.commit(|snap| snap.tracks[index].locked = locked))
    }

    pub fn set_track_hidden(&mut self, id: &TrackId, hidden: bool) -> Result<Arc<TimelineSnapshot>> {
        let index = self.track_index(id)?;
        Ok(self.commit(|snap| snap.tracks[index].hidden = hidden))
    }

    // ---- clips ----

    /// Adds a clip. Start is clamped at 0 and duration raised to the minimum.
    pub fn add_clip(&mut self, mut clip: Clip) -> Result<Arc<TimelineSnapshot>> {
        self.track_index(&clip.track_id)?;
        if self.current.clip(&clip.id).is_some() {
            return Err(StoreError::DuplicateId {
                id: clip.id.to_string(),
            }
            .into());
        }
        clip.start = finite_or_zero(clip.start).max(0.0);
        clip.duration = finite_or_zero(clip.duration).max(self.config.min_duration);
        tracing::debug!(
            "Added clip {} on {} at {:.3}+{:.3}",
            clip.id,
            clip.track_id,
            clip.start,
            clip.duration
        );
        Ok(self.commit(|snap| snap.clips.push(clip)))
    }

    /// Removes a clip. With ripple on, later clips on the same track close
    /// the gap.
    pub fn remove_clip(&mut self, id: &ClipId) -> Result<Clip> {
        self.check_unlocked(id)?;
        let index = self.clip_index(id)?;
        let ripple = self.config.ripple;
        let mut removed = None;
        self.commit(|snap| {
            let clip = snap.clips.remove(index);
            if ripple {
                shift_later(&mut snap.clips, &clip.track_id, clip.end(), -clip.duration, None);
            }
            removed = Some(clip);
        });
        removed.ok_or_else(|| StoreError::UnknownClip { id: id.to_string() }.into())
    }

    /// Writes clip timing from outside a gesture.
    pub fn set_clip_timing(
        &mut self,
        id: &ClipId,
        start: f64,
        duration: f64,
    ) -> Result<Arc<TimelineSnapshot>> {
        if let Err(err) = self.check_unlocked(id) {
            tracing::warn!("Rejected timing write to {}: held by a gesture", id);
            return Err(err);
        }
        let index = self.clip_index(id)?;
        let start = finite_or_zero(start).max(0.0);
        let duration = finite_or_zero(duration).max(self.config.min_duration);
        Ok(self.commit(|snap| {
            snap.clips[index].start = start;
            snap.clips[index].duration = duration;
        }))
    }

    // ---- playhead ----

    pub fn set_playhead(&mut self, time: f64) -> Arc<TimelineSnapshot> {
        let time = finite_or_zero(time).max(0.0);
        self.commit(|snap| snap.playhead = time)
    }

    /// Moves the playhead to `time`, snapping to the nearest clip boundary
    /// within the threshold when the magnet is on.
    pub fn scrub_playhead(&mut self, time: f64) -> f64 {
        let mut time = finite_or_zero(time).max(0.0);
        if self.config.magnet {
            let boundaries: Vec<f64> = self
                .current
                .clips
                .iter()
                .flat_map(|c| [c.start, c.end()])
                .collect();
            if let Some(b) = nearest_time(time, &boundaries, self.config.snap_time()) {
                time = b;
            }
        }
        self.set_playhead(time);
        time
    }

    // ---- drops ----

    /// Where a dropped asset would land for a pointer in timeline pixels.
    ///
    /// Returns `None` over the ruler, below the last lane or over a locked lane.
    pub fn placement_for_drop(&self, kind: ClipKind, pointer: Point) -> Option<ClipPlacement> {
        let lane = lane_at(pointer.y, self.config.track_height)?;
        let track = self.current.tracks.get(lane)?;
        if track.locked {
            return None;
        }
        Some(ClipPlacement {
            track_id: track.id.clone(),
            start: self.scale().px_to_time(pointer.x).max(0.0),
            duration: self.config.default_clip_duration,
            kind,
        })
    }

    /// Creates a clip from a drop. `Ok(None)` when the pointer is not over a
    /// valid lane.
    pub fn drop_clip(&mut self, kind: ClipKind, pointer: Point) -> Result<Option<ClipId>> {
        let Some(placement) = self.placement_for_drop(kind, pointer) else {
            tracing::debug!("Drop at ({:.1}, {:.1}) is not over a lane", pointer.x, pointer.y);
            return Ok(None);
        };
        let id = ClipId::generate();
        let clip = Clip::new(
            id.clone(),
            placement.track_id,
            placement.start,
            placement.duration,
            placement.kind,
        );
        self.add_clip(clip)?;
        Ok(Some(id))
    }

    // ---- gestures ----

    pub fn active_clip(&self) -> Option<&ClipId> {
        self.scheduler.active_clip()
    }

    /// Starts a move or trim on `clip_id`. `pointer` is in timeline pixels.
    pub fn begin_clip_drag(
        &mut self,
        clip_id: &ClipId,
        mode: ClipDragMode,
        pointer: Point,
    ) -> Result<()> {
        self.scheduler
            .begin(&self.current, clip_id, mode, pointer, &self.config)
    }

    /// Applies one pointer-move and commits the resulting timing.
    pub fn update_clip_drag(&mut self, pointer: Point) -> Option<ClipFrame> {
        let frame = self.scheduler.update(pointer, &self.current, &self.config)?;
        let index = self.current.clip_index(&frame.clip_id)?;
        let applied = frame.clone();
        self.commit(|snap| {
            let clip = &mut snap.clips[index];
            clip.track_id = applied.track_id;
            clip.start = applied.start;
            clip.duration = applied.duration;
        });
        Some(frame)
    }

    /// Ends the clip gesture. With ripple on, a right-edge trim shifts later
    /// clips on the same track by the change in duration.
    pub fn end_clip_drag(&mut self) -> std::result::Result<ClipOutcome, GestureError> {
        let outcome = self.scheduler.end()?;
        if self.config.ripple && outcome.mode == ClipDragMode::TrimEnd {
            let delta = outcome.frame.duration - outcome.before.duration;
            if delta != 0.0 {
                let track = outcome.before.track_id.clone();
                let old_end = outcome.before.end();
                let own = outcome.frame.clip_id.clone();
                self.commit(|snap| shift_later(&mut snap.clips, &track, old_end, delta, Some(&own)));
                tracing::debug!("Rippled clips after {:.3} on {} by {:.3}", old_end, track, delta);
            }
        }
        Ok(outcome)
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut TimelineSnapshot)) -> Arc<TimelineSnapshot> {
        let snap = Arc::make_mut(&mut self.current);
        mutate(snap);
        snap.version += 1;
        Arc::clone(&self.current)
    }

    fn track_index(&self, id: &TrackId) -> Result<usize> {
        self.current.track_index(id).ok_or_else(|| {
            Error::from(StoreError::UnknownTrack {
                track: id.to_string(),
            })
        })
    }

    fn clip_index(&self, id: &ClipId) -> Result<usize> {
        self.current
            .clip_index(id)
            .ok_or_else(|| StoreError::UnknownClip { id: id.to_string() }.into())
    }

    fn check_unlocked(&self, id: &ClipId) -> Result<()> {
        match self.scheduler.active_clip() {
            Some(active) if active == id => Err(StoreError::Locked { id: id.to_string() }.into()),
            _ => Ok(()),
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Shifts clips on `track` starting at or after `from` by `delta`, never
/// below zero.
fn shift_later(clips: &mut [Clip], track: &TrackId, from: f64, delta: f64, skip: Option<&ClipId>) {
    for clip in clips
        .iter_mut()
        .filter(|c| &c.track_id == track && c.start >= from && Some(&c.id) != skip)
    {
        clip.start = (clip.start + delta).max(0.0);
    }
}

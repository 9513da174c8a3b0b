//! Headless replay of recorded gesture scripts.
//!
//! A script seeds a canvas and a timeline, then feeds them pointer and
//! control events in order. Failed events are logged and skipped so a single
//! bad step does not hide the rest of the run.

use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use stagekit_core::{
    format_timecode, shared, CanvasSize, Clip, ClipId, ClipKind, Entity, Point, Result, RowRole,
    Shared, Track,
};
use stagekit_layout::{
    Canvas, ClipDragMode, EntitySnapshot, FixedViewport, RenderedRect, StackEntry, Timeline,
    TimelineSnapshot,
};
use stagekit_settings::Config;

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Logical resolution; the configured one when absent.
    pub canvas: Option<CanvasSize>,
    /// On-screen placement of the canvas; 1:1 at the origin when absent.
    pub viewport: Option<RenderedRect>,
    pub entities: Vec<Entity>,
    pub tracks: Vec<Track>,
    pub clips: Vec<Clip>,
    pub events: Vec<Event>,
}

impl Script {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))
    }
}

/// One step of a script. Canvas pointer events are in screen pixels,
/// timeline pointer events in timeline panel pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Slot { col: usize, row: RowRole },
    /// Assets dropped together at a logical canvas point.
    Drop { kinds: Vec<ClipKind>, x: f64, y: f64 },
    /// Shared magnet toggle for canvas and timeline.
    Magnet { on: bool },
    ClipDown {
        clip: ClipId,
        mode: ClipDragMode,
        x: f64,
        y: f64,
    },
    ClipMove { x: f64, y: f64 },
    ClipUp,
    Scrub { time: f64 },
    Zoom { pixels_per_second: f64 },
}

/// Final state of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutput {
    pub entities: EntitySnapshot,
    pub timeline: TimelineSnapshot,
    /// Composited layers at the playhead, bottom to top.
    pub stack: Vec<StackEntry>,
    /// Canvas commits observed during the run.
    pub commits: usize,
    /// Events that failed and were skipped.
    pub failed: usize,
}

/// Canvas and timeline driven by a script.
#[derive(Debug)]
pub struct Replay {
    canvas: Canvas,
    timeline: Timeline,
    commits: Shared<usize>,
    failed: usize,
}

impl Replay {
    /// Seeds a canvas and timeline from `script` using `config`.
    pub fn new(script: &Script, config: &Config) -> Result<Self> {
        let size = script.canvas.unwrap_or(config.canvas);
        let viewport = script
            .viewport
            .map(FixedViewport::new)
            .unwrap_or_else(|| FixedViewport::identity(size));

        let mut canvas = Canvas::with_viewport(size, config.interaction, viewport);
        for entity in &script.entities {
            canvas.insert_entity(entity.clone())?;
        }

        let mut timeline = Timeline::new(config.timeline);
        for track in &script.tracks {
            timeline.add_track(track.clone())?;
        }
        for clip in &script.clips {
            timeline.add_clip(clip.clone())?;
        }

        // Counting starts after seeding.
        let commits = shared(0);
        let counter = Rc::clone(&commits);
        canvas.set_commit_listener(move |_| *counter.borrow_mut() += 1);

        Ok(Self {
            canvas,
            timeline,
            commits,
            failed: 0,
        })
    }

    /// Applies one event.
    pub fn apply(&mut self, event: &Event) -> Result<()> {
        match event {
            Event::Down { x, y } => {
                let target = self.canvas.pointer_down(Point::new(*x, *y))?;
                tracing::debug!("pointer down on {:?}", target);
            }
            Event::Move { x, y } => {
                if self.canvas.pointer_move(Point::new(*x, *y)).is_none() {
                    tracing::trace!("move without an active gesture");
                }
            }
            Event::Up => {
                if let Some(outcome) = self.canvas.pointer_up()? {
                    tracing::info!("{} committed at {}", outcome.entity_id, outcome.rect);
                }
            }
            Event::Slot { col, row } => {
                let activation = self.canvas.activate_slot(*col, *row)?;
                tracing::info!("slot ({}, {}): {:?}", col, row, activation);
            }
            Event::Drop { kinds, x, y } => {
                let ids = self.canvas.drop_assets(kinds, Point::new(*x, *y))?;
                tracing::info!("dropped {} asset(s)", ids.len());
            }
            Event::Magnet { on } => {
                self.canvas.set_magnet(*on);
                self.timeline.set_magnet(*on);
            }
            Event::ClipDown { clip, mode, x, y } => {
                self.timeline
                    .begin_clip_drag(clip, *mode, Point::new(*x, *y))?;
            }
            Event::ClipMove { x, y } => {
                self.timeline.update_clip_drag(Point::new(*x, *y));
            }
            Event::ClipUp => {
                let outcome = self.timeline.end_clip_drag()?;
                tracing::info!(
                    "{} committed at {:.3}+{:.3} on {}",
                    outcome.frame.clip_id,
                    outcome.frame.start,
                    outcome.frame.duration,
                    outcome.frame.track_id
                );
            }
            Event::Scrub { time } => {
                let playhead = self.timeline.scrub_playhead(*time);
                tracing::debug!("playhead at {}", format_timecode(playhead));
            }
            Event::Zoom { pixels_per_second } => {
                self.timeline.set_zoom(*pixels_per_second);
            }
        }
        Ok(())
    }

    /// Applies every event of `script` in order, skipping failures.
    pub fn run_events(&mut self, events: &[Event]) {
        for (index, event) in events.iter().enumerate() {
            if let Err(err) = self.apply(event) {
                tracing::warn!("Event {} ({:?}) failed: {}", index, event, err);
                self.failed += 1;
            }
        }
    }

    pub fn output(&self) -> ReplayOutput {
        let timeline = self.timeline.snapshot();
        ReplayOutput {
            entities: (*self.canvas.snapshot()).clone(),
            timeline: (*timeline).clone(),
            stack: self.canvas.compose(&timeline),
            commits: *self.commits.borrow(),
            failed: self.failed,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }
}

/// Seeds, runs and summarizes `script` in one call.
pub fn run(script: &Script, config: &Config) -> Result<ReplayOutput> {
    let mut replay = Replay::new(script, config)?;
    replay.run_events(&script.events);
    Ok(replay.output())
}

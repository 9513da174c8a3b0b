//! Drag state machine for spatial entities.
//!
//! `Idle -> Moving | Resizing -> Idle`. On entry the controller snapshots the
//! entity's geometry and the logical pointer position; every update derives
//! the new geometry from that snapshot plus the total pointer delta, so no
//! drift accumulates across frames.
//!
//! Move pipeline per frame: clamp to canvas, snap, apply the region
//! constraint. Resize pipeline: move only the edges the handle owns, trim at
//! the region bounds, then enforce the minimum size by re-deriving the moved
//! edge from the fixed one.

use serde::{Deserialize, Serialize};
use stagekit_core::{
    CanvasSize, ColRole, Entity, EntityId, GestureError, InteractionConfig, Point, Rect, RowRole,
};
use std::fmt;
use std::time::Instant;

use crate::edge_feedback::{EdgeFeedback, EdgeSet};
use crate::region::{allowed_region, clamp_into, clamp_to_canvas};
use crate::snap::SnapResolver;

/// Which end of an axis a handle moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEdge {
    /// The axis is not touched.
    None,
    /// Left or top: moves the origin, the far edge stays.
    Start,
    /// Right or bottom: changes the size only.
    End,
}

/// One of the eight resize handles (corners and edge midpoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "tl")]
    TopLeft,
    #[serde(rename = "tm")]
    TopMiddle,
    #[serde(rename = "tr")]
    TopRight,
    #[serde(rename = "ml")]
    MiddleLeft,
    #[serde(rename = "mr")]
    MiddleRight,
    #[serde(rename = "bl")]
    BottomLeft,
    #[serde(rename = "bm")]
    BottomMiddle,
    #[serde(rename = "br")]
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopMiddle,
        ResizeHandle::TopRight,
        ResizeHandle::MiddleLeft,
        ResizeHandle::MiddleRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomMiddle,
        ResizeHandle::BottomRight,
    ];

    pub fn horizontal(&self) -> AxisEdge {
        match self {
            Self::TopLeft | Self::MiddleLeft | Self::BottomLeft => AxisEdge::Start,
            Self::TopRight | Self::MiddleRight | Self::BottomRight => AxisEdge::End,
            Self::TopMiddle | Self::BottomMiddle => AxisEdge::None,
        }
    }

    pub fn vertical(&self) -> AxisEdge {
        match self {
            Self::TopLeft | Self::TopMiddle | Self::TopRight => AxisEdge::Start,
            Self::BottomLeft | Self::BottomMiddle | Self::BottomRight => AxisEdge::End,
            Self::MiddleLeft | Self::MiddleRight => AxisEdge::None,
        }
    }

    /// Position of the handle on `rect`.
    pub fn position(&self, rect: &Rect) -> Point {
        let x = match self.horizontal() {
            AxisEdge::Start => rect.x,
            AxisEdge::None => rect.center_x(),
            AxisEdge::End => rect.right(),
        };
        let y = match self.vertical() {
            AxisEdge::Start => rect.y,
            AxisEdge::None => rect.center_y(),
            AxisEdge::End => rect.bottom(),
        };
        Point::new(x, y)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TopLeft => "tl",
            Self::TopMiddle => "tm",
            Self::TopRight => "tr",
            Self::MiddleLeft => "ml",
            Self::MiddleRight => "mr",
            Self::BottomLeft => "bl",
            Self::BottomMiddle => "bm",
            Self::BottomRight => "br",
        };
        f.write_str(name)
    }
}

/// Gesture kind requested at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Move,
    Resize(ResizeHandle),
}

/// Snapshot taken when a gesture starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub entity_id: EntityId,
    pub row_role: RowRole,
    pub col_role: ColRole,
    pub start_rect: Rect,
    pub start_pointer: Point,
    /// Last geometry computed for this gesture.
    pub current: Rect,
}

/// Drag controller state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Moving(DragSession),
    Resizing(DragSession, ResizeHandle),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Moving(s) | Self::Resizing(s, _) => Some(s),
        }
    }
}

/// Geometry produced by one pointer-move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragFrame {
    pub entity_id: EntityId,
    pub rect: Rect,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub guide_x: Option<f64>,
    pub guide_y: Option<f64>,
    /// Edges currently highlighted for boundary contact.
    pub lit_edges: EdgeSet,
}

/// Result of ending a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOutcome {
    pub entity_id: EntityId,
    pub rect: Rect,
    pub changed: bool,
}

/// Turns logical pointer positions into committed entity geometry.
#[derive(Debug, Clone)]
pub struct DragController {
    canvas: CanvasSize,
    config: InteractionConfig,
    state: DragState,
    feedback: EdgeFeedback,
}

impl DragController {
    pub fn new(canvas: CanvasSize, config: InteractionConfig) -> Self {
        Self {
            canvas,
            config,
            state: DragState::Idle,
            feedback: EdgeFeedback::from_config(&config),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn active_entity(&self) -> Option<&EntityId> {
        self.state.session().map(|s| &s.entity_id)
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replaces the interaction settings. Takes effect on the next frame.
    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
        self.feedback = EdgeFeedback::from_config(&config);
    }

    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Starts a gesture on `entity`.
    ///
    /// # Arguments
    /// * `entity` - The entity as currently committed
    /// * `mode` - Move, or resize by one handle
    /// * `pointer` - Pointer position in logical units
    pub fn begin_drag(
        &mut self,
        entity: &Entity,
        mode: DragMode,
        pointer: Point,
    ) -> Result<(), GestureError> {
        if let Some(session) = self.state.session() {
            return Err(GestureError::AlreadyActive {
                id: session.entity_id.to_string(),
            });
        }
        if entity.hidden {
            return Err(GestureError::Hidden {
                id: entity.id.to_string(),
            });
        }

        let start_rect = entity.rect.sanitized();
        let session = DragSession {
            entity_id: entity.id.clone(),
            row_role: entity.row_role,
            col_role: entity.col_role,
            start_rect,
            start_pointer: pointer,
            current: start_rect,
        };
        self.feedback.clear();
        self.state = match mode {
            DragMode::Move => DragState::Moving(session),
            DragMode::Resize(handle) => DragState::Resizing(session, handle),
        };
        tracing::debug!("Drag begin on {} ({:?}) at {}", entity.id, mode, start_rect);
        Ok(())
    }

    /// Computes the geometry for a new pointer position.
    ///
    /// `entities` is the committed view used for snap candidates. Returns
    /// `None` when no gesture is active.
    pub fn update_drag(&mut self, pointer: Point, entities: &[Entity]) -> Option<DragFrame> {
        self.update_drag_at(pointer, entities, Instant::now())
    }

    /// [`DragController::update_drag`] with an explicit clock reading for the
    /// edge highlight.
    pub fn update_drag_at(
        &mut self,
        pointer: Point,
        entities: &[Entity],
        now: Instant,
    ) -> Option<DragFrame> {
        let canvas = self.canvas;
        let config = self.config;
        let resolver = SnapResolver::from_config(&config);

        let (session, handle) = match &mut self.state {
            DragState::Idle => return None,
            DragState::Moving(s) => (s, None),
            DragState::Resizing(s, h) => (s, Some(*h)),
        };

        let (dx, dy) = pointer.delta_from(session.start_pointer);
        let bounds = allowed_region(session.row_role, session.col_role, canvas);

        let mut frame = DragFrame {
            entity_id: session.entity_id.clone(),
            rect: session.start_rect,
            snapped_x: false,
            snapped_y: false,
            guide_x: None,
            guide_y: None,
            lit_edges: EdgeSet::new(),
        };

        frame.rect = match handle {
            None => {
                let moved = clamp_to_canvas(
                    session.start_rect.translated(dx, dy),
                    canvas,
                    config.min_size,
                );
                let snapped = resolver.snap(&session.entity_id, moved, entities, canvas);
                let clamped = clamp_into(snapped.rect, bounds, config.min_size);
                // A region clamp that moved the rect off its guide cancels that axis.
                if clamped.x == snapped.rect.x && snapped.snapped_x {
                    frame.snapped_x = true;
                    frame.guide_x = snapped.guide_x;
                }
                if clamped.y == snapped.rect.y && snapped.snapped_y {
                    frame.snapped_y = true;
                    frame.guide_y = snapped.guide_y;
                }
                clamped
            }
            Some(handle) => {
                let resized =
                    resize_rect(session.start_rect, handle, dx, dy, bounds, config.min_size);
                clamp_into(resized, bounds, config.min_size)
            }
        };

        session.current = frame.rect;
        frame.lit_edges = self.feedback.update(frame.rect, bounds, now);
        Some(frame)
    }

    /// Ends the gesture, returning the last computed geometry.
    ///
    /// There is no abort: whatever the last frame produced is the result.
    pub fn end_drag(&mut self) -> Result<DragOutcome, GestureError> {
        let state = std::mem::take(&mut self.state);
        self.feedback.clear();
        let session = match state {
            DragState::Idle => return Err(GestureError::NotActive),
            DragState::Moving(s) | DragState::Resizing(s, _) => s,
        };
        let outcome = DragOutcome {
            changed: session.current != session.start_rect,
            entity_id: session.entity_id,
            rect: session.current,
        };
        tracing::debug!("Drag end on {} at {}", outcome.entity_id, outcome.rect);
        Ok(outcome)
    }

    /// Last computed geometry of the active gesture.
    pub fn current_rect(&self) -> Option<Rect> {
        self.state.session().map(|s| s.current)
    }
}

/// Applies a handle drag of `(dx, dy)` to `start`.
///
/// Edges the handle does not own are left unchanged. Moved edges stop at the
/// bounds, and a size below `min_size` is fixed by re-deriving the moved edge
/// from the fixed one.
pub fn resize_rect(
    start: Rect,
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    bounds: Rect,
    min_size: f64,
) -> Rect {
    let (x, w) = resize_axis(
        start.x,
        start.w,
        dx,
        handle.horizontal(),
        bounds.x,
        bounds.right(),
        min_size,
    );
    let (y, h) = resize_axis(
        start.y,
        start.h,
        dy,
        handle.vertical(),
        bounds.y,
        bounds.bottom(),
        min_size,
    );
    Rect::new(x, y, w, h)
}

fn resize_axis(
    pos: f64,
    size: f64,
    delta: f64,
    edge: AxisEdge,
    lo: f64,
    hi: f64,
    min_size: f64,
) -> (f64, f64) {
    match edge {
        AxisEdge::None => (pos, size),
        AxisEdge::Start => {
            let end = pos + size;
            let mut start = (pos + delta).max(lo);
            if end - start < min_size {
                start = end - min_size;
            }
            (start, end - start)
        }
        AxisEdge::End => {
            let mut end = (pos + size + delta).min(hi);
            if end - pos < min_size {
                end = pos + min_size;
            }
            (pos, end - pos)
        }
    }
}

//! # StageKit Layout
//!
//! Direct-manipulation engine for a layer and timeline composition editor.
//! Turns raw pointer input into committed geometry and timing for two kinds of
//! objects:
//!
//! - **Entities**: positioned, sized layers on a fixed-resolution canvas
//! - **Clips**: time intervals placed on parallel timeline tracks
//!
//! ## Core Components
//!
//! ### Canvas
//! - **Viewport**: Screen to logical coordinate mapping for a letterboxed canvas
//! - **Drag**: Move and eight-handle resize gestures driven from a start snapshot
//! - **Snap**: Magnetic alignment to canvas and sibling edges and centers
//! - **Region**: Canvas bounds and the background vertical thirds
//! - **Edge Feedback**: Per-edge contact highlighting with a short flash
//! - **Slot Matrix**: Column/row slot keys, z-ordering and default geometry
//! - **Entity Store**: Versioned snapshots with a gesture lock
//!
//! ### Timeline
//! - **Scheduler**: Clip move and trim gestures with time snapping
//! - **Timeline**: Tracks, clips, playhead, zoom and ripple editing
//!
//! ### Composition
//! - **Composite**: Stacking of active clips beneath canvas layers
//!
//! ## Architecture
//!
//! ```text
//! Canvas (pointer events in screen space)
//!   ├── Viewport (rendered rect, queried once per gesture)
//!   ├── SelectionManager (single selection, hit testing)
//!   ├── DragController
//!   │     └── snap → region clamp → edge feedback
//!   └── EntityStore (Arc snapshots, commit listener)
//!
//! Timeline
//!   ├── TimelineScheduler (move / trim, time snapping)
//!   └── TimelineSnapshot (tracks, clips, playhead)
//!
//! compose_stack (clips + entities → z-ordered layers)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use stagekit_core::{CanvasSize, InteractionConfig, Point, RowRole};
//! use stagekit_layout::{Canvas, SlotActivation};
//!
//! let mut canvas = Canvas::new(CanvasSize::new(1920.0, 1080.0), InteractionConfig::default());
//! let created = canvas.activate_slot(2, RowRole::Background).unwrap();
//! assert!(matches!(created, SlotActivation::Created(_)));
//!
//! canvas.pointer_down(Point::new(960.0, 540.0)).unwrap();
//! canvas.pointer_move(Point::new(960.0, 100.0));
//! let outcome = canvas.pointer_up().unwrap().unwrap();
//! // Background boxes of the mid column stay inside the middle third.
//! assert_eq!(outcome.rect.y, 360.0);
//! ```

pub mod canvas;
pub mod composite;
pub mod drag;
pub mod edge_feedback;
pub mod entity_store;
pub mod region;
pub mod selection_manager;
pub mod slot_matrix;
pub mod snap;
pub mod timeline;
pub mod viewport;

pub use canvas::{drop_row_role, Canvas, HitTarget, SlotActivation};
pub use composite::{clip_z_index, compose_stack, LayerSource, StackEntry};
pub use drag::{
    resize_rect, AxisEdge, DragController, DragFrame, DragMode, DragOutcome, DragSession,
    DragState, ResizeHandle,
};
pub use edge_feedback::{touching_edges, EdgeFeedback, EdgeSet};
pub use entity_store::{EntitySnapshot, EntityStore};
pub use region::{
    allowed_region, apply_region_constraint, clamp_into, clamp_to_canvas, region_for,
    RegionConstraint,
};
pub use selection_manager::SelectionManager;
pub use slot_matrix::{compute_slot, default_geometry, SlotAssignment};
pub use snap::{AxisLines, SnapLines, SnapResolver, SnapResult};
pub use timeline::{
    lane_at, nearest_time, snap_candidates, snap_time, ClipDragMode, ClipFrame, ClipOutcome,
    ClipPlacement, ClipSession, Timeline, TimelineScheduler, TimelineSnapshot,
};
pub use viewport::{CoordinateSpace, FixedViewport, RenderedRect, Viewport};

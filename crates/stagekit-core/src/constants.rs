//! Engine-wide default values.
//!
//! Every tunable here has a matching field in [`crate::config`]; these are only
//! the defaults used when nothing else is configured.

/// Default logical canvas width.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1920.0;

/// Default logical canvas height.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 1080.0;

/// Smallest width/height a spatial entity may take, in logical units.
pub const MIN_ENTITY_SIZE: f64 = 10.0;

/// Magnetic snap threshold in logical units.
pub const SNAP_DISTANCE: f64 = 15.0;

/// Distance at which an edge counts as touching its constraining boundary.
pub const EDGE_CONTACT_TOLERANCE: f64 = 2.0;

/// How long an edge-contact highlight stays lit after first contact.
pub const EDGE_FLASH_MS: u64 = 500;

/// Pointer distance, in screen pixels, at which a resize handle is hit.
pub const HANDLE_HIT_RADIUS_PX: f64 = 6.0;

/// Padding reserved around the canvas when fitting it into its container.
pub const VIEW_PADDING: f64 = 20.0;

/// Base z-index of the first slot-matrix column.
pub const Z_BASE: i32 = 100;

/// z-index distance between two adjacent slot-matrix columns.
pub const Z_COLUMN_STEP: i32 = 100;

/// Per-row z offsets. Background < text < effect.
pub const Z_OFFSET_BACKGROUND: i32 = 20;
pub const Z_OFFSET_TEXT: i32 = 40;
pub const Z_OFFSET_EFFECT: i32 = 80;

/// z-index given to boxes created by dropping an asset on the canvas.
pub const Z_DROPPED_ASSET: i32 = 100;

/// Offset between consecutive assets of one multi-asset drop.
pub const DROP_CASCADE_OFFSET: f64 = 50.0;

/// Gap kept between the topmost clip layer and the first layer entity.
pub const Z_LAYER_ABOVE_CLIPS: i32 = 100;

/// z-index distance between two clip tracks when composited.
pub const Z_TRACK_STEP: i32 = 100;

/// Default timeline zoom in pixels per second.
pub const DEFAULT_PIXELS_PER_SECOND: f64 = 20.0;

/// Timeline zoom limits in pixels per second.
pub const MIN_PIXELS_PER_SECOND: f64 = 10.0;
pub const MAX_PIXELS_PER_SECOND: f64 = 100.0;

/// Timeline snap threshold in screen pixels (converted to time by the zoom).
pub const TIMELINE_SNAP_PIXELS: f64 = 10.0;

/// Height of one track lane in pixels.
pub const TRACK_HEIGHT_PX: f64 = 40.0;

/// Height of the time ruler drawn above the first lane.
pub const RULER_HEIGHT_PX: f64 = 24.0;

/// Shortest duration a clip may be trimmed to, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.1;

/// Duration of a clip created by dropping an asset on the timeline.
pub const DEFAULT_CLIP_DURATION: f64 = 10.0;

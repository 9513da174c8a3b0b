//! # StageKit
//!
//! A direct-manipulation layout engine for a layer and timeline composition
//! editor:
//! - Drag and eight-handle resize of canvas layers with magnetic snapping
//! - Region constraints (background layers confined to horizontal thirds)
//! - Edge-contact feedback while dragging
//! - Slot matrix addressing with deterministic z-ordering
//! - Timeline clip moves and trims with time snapping and ripple editing
//!
//! ## Architecture
//!
//! StageKit is organized as a workspace with multiple crates:
//!
//! 1. **stagekit-core** - Data model, engine configuration, errors, units
//! 2. **stagekit-settings** - Configuration files and persistence
//! 3. **stagekit-layout** - Canvas and timeline gesture engine
//! 4. **stagekit** - Re-exports, logging setup and the headless replay binary

pub mod replay;

pub use stagekit_core::{
    CanvasSize, Clip, ClipId, ClipKind, ColRole, Column, Edge, Entity, EntityId, Error,
    GestureError, InteractionConfig, Point, Rect, Result, RowRole, SlotKey, StoreError,
    TimeScale, TimelineConfig, Track, TrackId, TrackKind,
};

pub use stagekit_layout::{
    compose_stack, Canvas, ClipDragMode, CoordinateSpace, DragMode, EntitySnapshot, EntityStore,
    FixedViewport, HitTarget, RenderedRect, ResizeHandle, SlotActivation, StackEntry, Timeline,
    TimelineSnapshot, Viewport,
};

pub use stagekit_settings::{Config, SettingsPersistence};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr (stdout carries replay output)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

//! # StageKit Core
//!
//! Core types, configuration and errors shared by the StageKit crates.
//! Provides the data model that the layout engine reads and rewrites:
//! spatial entities placed on a fixed-resolution canvas, and clips scheduled
//! on parallel timeline tracks.

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod types;
pub mod units;

pub use config::{CanvasSize, InteractionConfig, TimelineConfig};

pub use data::{
    Clip, ClipId, ClipKind, ColRole, Column, Edge, Entity, EntityId, Point, Rect, RowRole,
    SlotKey, Track, TrackId, TrackKind,
};

pub use error::{Error, GestureError, Result, StoreError};

pub use types::{shared, CommitCallback, Shared};

pub use units::{format_timecode, TimeScale};

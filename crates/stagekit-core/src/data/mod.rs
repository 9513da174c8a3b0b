//! Data model read and rewritten by the layout engine.
//!
//! Records are owned by the surrounding application; the engine only rewrites
//! geometry and timing fields.

mod clip;
mod entity;
mod geometry;

pub use clip::{Clip, ClipId, ClipKind, Track, TrackId, TrackKind};
pub use entity::{ColRole, Column, Entity, EntityId, RowRole, SlotKey};
pub use geometry::{Edge, Point, Rect};

//! Error handling for StageKit
//!
//! The geometry core is total: coordinate mapping, snapping, clamping and slot
//! derivation never fail. Errors only surface at the record boundary:
//! - Store errors (unknown records, slot conflicts, records held by a gesture)
//! - Gesture errors (state machine misuse, locked tracks)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Store error type
///
/// Raised by the entity store and the timeline store when a write cannot be
/// applied to the owned records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No entity with this id
    #[error("Unknown entity: {id}")]
    UnknownEntity {
        /// The requested entity id.
        id: String,
    },

    /// No clip with this id
    #[error("Unknown clip: {id}")]
    UnknownClip {
        /// The requested clip id.
        id: String,
    },

    /// No track with this id or index
    #[error("Unknown track: {track}")]
    UnknownTrack {
        /// The requested track id or index.
        track: String,
    },

    /// Record id already present
    #[error("Duplicate id: {id}")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// A visible entity already holds the slot
    #[error("Slot {slot_key} is already held by {holder}")]
    SlotOccupied {
        /// The contested slot key.
        slot_key: String,
        /// The entity currently holding it.
        holder: String,
    },

    /// The record is being manipulated by an active gesture
    #[error("{id} is locked by an active gesture")]
    Locked {
        /// The locked record id.
        id: String,
    },
}

/// Gesture error type
///
/// Represents misuse of the drag state machines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    /// A gesture is already running
    #[error("A gesture on {id} is already active")]
    AlreadyActive {
        /// The record the running gesture holds.
        id: String,
    },

    /// No gesture is running
    #[error("No active gesture")]
    NotActive,

    /// Resize handles only exist on the selected entity
    #[error("Resize handles of {id} are not hit-testable: entity is not selected")]
    NotSelected {
        /// The entity the handle was requested on.
        id: String,
    },

    /// The entity is hidden and cannot be manipulated
    #[error("Entity {id} is hidden")]
    Hidden {
        /// The hidden entity id.
        id: String,
    },

    /// The clip's track rejects edits
    #[error("Track {track} is locked")]
    TrackLocked {
        /// The locked track id.
        track: String,
    },
}

/// Main error type for StageKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Gesture error
    #[error(transparent)]
    Gesture(#[from] GestureError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error was caused by an active gesture holding a record
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            Error::Store(StoreError::Locked { .. })
                | Error::Gesture(GestureError::AlreadyActive { .. })
                | Error::Gesture(GestureError::TrackLocked { .. })
        )
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this is a gesture error
    pub fn is_gesture_error(&self) -> bool {
        matches!(self, Error::Gesture(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

//! Edge-contact highlight tracking.
//!
//! Each edge of the dragged entity is checked against the matching edge of
//! its constraining region after every geometry update. First contact lights
//! the edge for a fixed duration; losing contact clears it at once. The
//! indicator is level-triggered: staying in contact never re-lights it.

use smallvec::SmallVec;
use stagekit_core::{Edge, InteractionConfig, Rect};
use std::time::{Duration, Instant};

/// Edges touching their boundary, in [`Edge::ALL`] order.
pub type EdgeSet = SmallVec<[Edge; 4]>;

/// Edges of `rect` within `tolerance` of the same edge of `bounds`.
pub fn touching_edges(rect: Rect, bounds: Rect, tolerance: f64) -> EdgeSet {
    Edge::ALL
        .iter()
        .copied()
        .filter(|edge| {
            let gap = match edge {
                Edge::Top => rect.y - bounds.y,
                Edge::Bottom => bounds.bottom() - rect.bottom(),
                Edge::Left => rect.x - bounds.x,
                Edge::Right => bounds.right() - rect.right(),
            };
            gap.abs() <= tolerance
        })
        .collect()
}

fn slot(edge: Edge) -> usize {
    match edge {
        Edge::Top => 0,
        Edge::Bottom => 1,
        Edge::Left => 2,
        Edge::Right => 3,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct EdgeState {
    in_contact: bool,
    lit_since: Option<Instant>,
}

/// Per-edge contact state of the entity being dragged.
#[derive(Debug, Clone)]
pub struct EdgeFeedback {
    tolerance: f64,
    flash: Duration,
    states: [EdgeState; 4],
}

impl EdgeFeedback {
    pub fn new(tolerance: f64, flash: Duration) -> Self {
        Self {
            tolerance,
            flash,
            states: [EdgeState::default(); 4],
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(
            config.edge_tolerance,
            Duration::from_millis(config.edge_flash_ms),
        )
    }

    /// Records the entity's new geometry and returns the edges lit at `now`.
    pub fn update(&mut self, rect: Rect, bounds: Rect, now: Instant) -> EdgeSet {
        let touching = touching_edges(rect, bounds, self.tolerance);
        for edge in Edge::ALL {
            let state = &mut self.states[slot(edge)];
            let contact = touching.contains(&edge);
            if contact && !state.in_contact {
                tracing::trace!("edge contact: {}", edge);
                state.lit_since = Some(now);
            } else if !contact {
                state.lit_since = None;
            }
            state.in_contact = contact;
        }
        self.lit_edges(now)
    }

    /// True while `edge` is in contact and its highlight has not expired.
    pub fn is_lit(&self, edge: Edge, now: Instant) -> bool {
        let state = &self.states[slot(edge)];
        match state.lit_since {
            Some(since) => state.in_contact && now.saturating_duration_since(since) < self.flash,
            None => false,
        }
    }

    pub fn lit_edges(&self, now: Instant) -> EdgeSet {
        Edge::ALL
            .iter()
            .copied()
            .filter(|edge| self.is_lit(*edge, now))
            .collect()
    }

    pub fn in_contact(&self, edge: Edge) -> bool {
        self.states[slot(edge)].in_contact
    }

    /// Drops all highlights, e.g. when the gesture ends.
    pub fn clear(&mut self) {
        self.states = [EdgeState::default(); 4];
    }
}

impl Default for EdgeFeedback {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

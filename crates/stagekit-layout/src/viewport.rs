//! Viewport and coordinate transformation for canvas interaction.
//!
//! Handles conversion between screen coordinates (pointer events) and logical
//! canvas units (entity geometry). The canvas is drawn uniformly scaled inside
//! its container, so a single scale factor plus the rendered origin fully
//! describe the mapping.

use serde::{Deserialize, Serialize};
use stagekit_core::constants::VIEW_PADDING;
use stagekit_core::{CanvasSize, Point};
use std::fmt;

/// Screen-space rectangle the canvas is currently drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderedRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

impl fmt::Display for RenderedRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1} {:.1}x{:.1}]",
            self.left, self.top, self.width, self.height
        )
    }
}

/// Mapping between screen points and logical canvas units.
///
/// A `CoordinateSpace` is a pure value: it is built from the rendered rect and
/// the logical canvas size and has no side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSpace {
    rendered: RenderedRect,
    logical: CanvasSize,
}

impl CoordinateSpace {
    pub fn new(rendered: RenderedRect, logical: CanvasSize) -> Self {
        Self { rendered, logical }
    }

    /// Space where screen and logical units coincide.
    pub fn identity(logical: CanvasSize) -> Self {
        Self::new(RenderedRect::new(0.0, 0.0, logical.w, logical.h), logical)
    }

    /// Fits the logical canvas into a container, centered, with padding.
    ///
    /// # Arguments
    /// * `container_w`, `container_h` - Size of the container in screen pixels
    /// * `logical` - Logical canvas resolution
    /// * `padding` - Pixels reserved around the canvas (split between both sides)
    ///
    /// The scale is the smaller of the two axis ratios so the whole canvas stays
    /// visible. A container too small to give a positive scale yields identity.
    pub fn fit(container_w: f64, container_h: f64, logical: CanvasSize, padding: f64) -> Self {
        let scale_x = (container_w - padding) / logical.w;
        let scale_y = (container_h - padding) / logical.h;
        let mut scale = scale_x.min(scale_y);
        if !(scale > 0.0) || !scale.is_finite() {
            scale = 1.0;
        }

        let width = logical.w * scale;
        let height = logical.h * scale;
        let rendered = RenderedRect::new(
            (container_w - width) / 2.0,
            (container_h - height) / 2.0,
            width,
            height,
        );
        Self::new(rendered, logical)
    }

    /// [`CoordinateSpace::fit`] with the default view padding.
    pub fn fit_default(container_w: f64, container_h: f64, logical: CanvasSize) -> Self {
        Self::fit(container_w, container_h, logical, VIEW_PADDING)
    }

    pub fn rendered_rect(&self) -> RenderedRect {
        self.rendered
    }

    pub fn logical_size(&self) -> CanvasSize {
        self.logical
    }

    /// Screen pixels per logical unit. Falls back to 1 when the rendered width
    /// (or the logical width) is zero or not finite.
    pub fn scale(&self) -> f64 {
        let scale = self.rendered.width / self.logical.w;
        if self.rendered.width > 0.0 && scale > 0.0 && scale.is_finite() {
            scale
        } else {
            1.0
        }
    }

    /// Converts a screen point to logical canvas units.
    ///
    /// Formula:
    /// ```text
    /// logical = (screen - rendered.origin) / scale
    /// ```
    pub fn to_logical(&self, screen: Point) -> Point {
        let scale = self.scale();
        Point::new(
            (screen.x - self.rendered.left) / scale,
            (screen.y - self.rendered.top) / scale,
        )
    }

    /// Converts logical canvas units back to a screen point.
    pub fn to_screen(&self, logical: Point) -> Point {
        let scale = self.scale();
        Point::new(
            logical.x * scale + self.rendered.left,
            logical.y * scale + self.rendered.top,
        )
    }

    /// Converts a screen-pixel length to logical units.
    pub fn length_to_logical(&self, px: f64) -> f64 {
        px / self.scale()
    }
}

/// Converts a screen point to logical units for the given rendered rect.
pub fn to_logical(screen: Point, rendered: RenderedRect, logical: CanvasSize) -> Point {
    CoordinateSpace::new(rendered, logical).to_logical(screen)
}

/// Source of the canvas' current on-screen placement.
///
/// The engine queries it once when a gesture starts and keeps the resulting
/// [`CoordinateSpace`] for the rest of the gesture.
pub trait Viewport {
    fn rendered_rect(&self) -> RenderedRect;
}

/// Viewport with an explicitly set rendered rect.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedViewport {
    rect: RenderedRect,
}

impl FixedViewport {
    pub fn new(rect: RenderedRect) -> Self {
        Self { rect }
    }

    /// Canvas drawn at 1:1 with its origin at the screen origin.
    pub fn identity(logical: CanvasSize) -> Self {
        Self::new(CoordinateSpace::identity(logical).rendered_rect())
    }

    /// Canvas fitted into a container of the given size.
    pub fn fitted(container_w: f64, container_h: f64, logical: CanvasSize) -> Self {
        Self::new(CoordinateSpace::fit_default(container_w, container_h, logical).rendered_rect())
    }

    pub fn set_rect(&mut self, rect: RenderedRect) {
        self.rect = rect;
    }
}

impl Viewport for FixedViewport {
    fn rendered_rect(&self) -> RenderedRect {
        self.rect
    }
}

impl<V: Viewport + ?Sized> Viewport for std::rc::Rc<std::cell::RefCell<V>> {
    fn rendered_rect(&self) -> RenderedRect {
        self.borrow().rendered_rect()
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Imaging: backend-agnostic drawing primitives for tree layouts.
//!
//! The Canopy renderers are pure layout computations: they never touch a
//! screen, a printer, or an image encoder. Instead they emit an ordered
//! sequence of plain-old-data drawing operations ([`DrawOp`]) into a
//! [`DrawTarget`]. Backends map those onto their native drawing surface;
//! the [`Recording`] target collects them into a vector, which is also the
//! reference behavior the test suites assert against.
//!
//! # Position in the stack
//!
//! - **Layout**: the `canopy_render` strategies partition a [`Surface`] and
//!   decide what to draw where.
//! - **Imaging IR (this crate)**: rectangles, circles, wedges, lines, and
//!   clipped centered labels, each with a solid [`peniko::Color`].
//! - **Backends**: anything that can fill a rect and a pie wedge — a raster
//!   canvas, an SVG writer, a print context.
//!
//! Coordinates follow the usual raster convention: x grows right, y grows
//! down, the origin is the surface's top-left corner. Wedge angles are in
//! degrees, counter-clockwise from the positive x axis, so they match the
//! on-screen appearance despite the flipped y axis.

#![no_std]

extern crate alloc;

mod color;

pub use color::Hsb;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

/// A passive render target descriptor: just a width and a height in pixels.
///
/// Decoupling the layout from any live display lets the same algorithms
/// serve on-screen drawing, printing, and image export.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Surface {
    /// Creates a surface descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle on the pixel grid.
///
/// Stored as origin plus extent, in whole pixels. Layout arithmetic is
/// integral by design: the hit-test side recomputes the same boundaries
/// with the same rounding, so a painted pixel always maps back to the node
/// that painted it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// X coordinate of the left edge.
    pub x: i32,
    /// Y coordinate of the top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl PixelRect {
    /// Creates a rectangle from origin and extent.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the point lies inside (right/bottom exclusive).
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Returns the center point, rounded down.
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Returns `true` if the rectangle has no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A single drawing operation with a solid color.
///
/// Operations are emitted in painting order; later operations cover earlier
/// ones. Backends that cannot represent a primitive exactly (e.g. wedges on
/// a rectangles-only target) may approximate, but hit-testing never depends
/// on backend behavior — it re-runs the layout arithmetic instead.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Rectangle to fill.
        rect: PixelRect,
        /// Fill color.
        color: Color,
    },
    /// Stroke the outline of an axis-aligned rectangle.
    StrokeRect {
        /// Rectangle to outline.
        rect: PixelRect,
        /// Stroke color.
        color: Color,
    },
    /// Fill a circle.
    FillCircle {
        /// X coordinate of the center.
        cx: f64,
        /// Y coordinate of the center.
        cy: f64,
        /// Radius in pixels.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Stroke the outline of a circle.
    StrokeCircle {
        /// X coordinate of the center.
        cx: f64,
        /// Y coordinate of the center.
        cy: f64,
        /// Radius in pixels.
        radius: f64,
        /// Stroke color.
        color: Color,
    },
    /// Fill a pie wedge: the region between two radii and an arc.
    FillWedge {
        /// X coordinate of the wedge apex (the disk center).
        cx: f64,
        /// Y coordinate of the wedge apex.
        cy: f64,
        /// Outer radius in pixels.
        radius: f64,
        /// Start angle in degrees, counter-clockwise from the +x axis.
        start_angle: f64,
        /// Angular span in degrees, counter-clockwise.
        sweep: f64,
        /// Fill color.
        color: Color,
    },
    /// Stroke a circular arc (the curved boundary only, no radii).
    StrokeArc {
        /// X coordinate of the arc center.
        cx: f64,
        /// Y coordinate of the arc center.
        cy: f64,
        /// Radius in pixels.
        radius: f64,
        /// Start angle in degrees, counter-clockwise from the +x axis.
        start_angle: f64,
        /// Angular span in degrees, counter-clockwise.
        sweep: f64,
        /// Stroke color.
        color: Color,
    },
    /// Stroke a straight line segment.
    Line {
        /// X coordinate of the first endpoint.
        x0: f64,
        /// Y coordinate of the first endpoint.
        y0: f64,
        /// X coordinate of the second endpoint.
        x1: f64,
        /// Y coordinate of the second endpoint.
        y1: f64,
        /// Stroke color.
        color: Color,
    },
    /// Draw a text label centered on a point, clipped to a rectangle.
    Label {
        /// Label text.
        text: String,
        /// X coordinate of the center the text is laid out around.
        cx: i32,
        /// Y coordinate of the center the text is laid out around.
        cy: i32,
        /// Clip rectangle; backends must not paint text outside it.
        clip: PixelRect,
        /// Text color.
        color: Color,
    },
}

/// A sink for drawing operations.
///
/// The single required method is [`DrawTarget::draw`]; the convenience
/// methods construct the corresponding [`DrawOp`].
pub trait DrawTarget {
    /// Consumes one drawing operation.
    fn draw(&mut self, op: DrawOp);

    /// Fill an axis-aligned rectangle.
    #[inline]
    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        self.draw(DrawOp::FillRect { rect, color });
    }

    /// Stroke the outline of an axis-aligned rectangle.
    #[inline]
    fn stroke_rect(&mut self, rect: PixelRect, color: Color) {
        self.draw(DrawOp::StrokeRect { rect, color });
    }

    /// Fill a circle.
    #[inline]
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.draw(DrawOp::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    /// Stroke the outline of a circle.
    #[inline]
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        self.draw(DrawOp::StrokeCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    /// Fill a pie wedge.
    #[inline]
    fn fill_wedge(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        color: Color,
    ) {
        self.draw(DrawOp::FillWedge {
            cx,
            cy,
            radius,
            start_angle,
            sweep,
            color,
        });
    }

    /// Stroke a circular arc.
    #[inline]
    fn stroke_arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        sweep: f64,
        color: Color,
    ) {
        self.draw(DrawOp::StrokeArc {
            cx,
            cy,
            radius,
            start_angle,
            sweep,
            color,
        });
    }

    /// Stroke a straight line segment.
    #[inline]
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Color) {
        self.draw(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    /// Draw a centered, clipped text label.
    #[inline]
    fn label(&mut self, text: String, cx: i32, cy: i32, clip: PixelRect, color: Color) {
        self.draw(DrawOp::Label {
            text,
            cx,
            cy,
            clip,
            color,
        });
    }
}

/// A [`DrawTarget`] that collects operations into a vector.
///
/// This is the reference backend: tests assert against the recorded
/// sequence, and embedders can replay it onto any concrete surface.
#[derive(Default)]
pub struct Recording {
    ops: Vec<DrawOp>,
}

impl Recording {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded operations in painting order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Discards all recorded operations.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Returns the number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl DrawTarget for Recording {
    fn draw(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl core::fmt::Debug for Recording {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recording")
            .field("len", &self.ops.len())
            .finish_non_exhaustive()
    }
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Radial strategy: a center disk plus one ring per depth.

use alloc::format;

use canopy_imaging::{DrawTarget, Surface};
use canopy_property::{Configuration, Property};
use canopy_tree::TreeSource;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use peniko::Color;

use crate::{BACKGROUND, RenderContext, TreeRenderer, hsb_for, pixel_coord, pixel_rect};

/// Key for the diameter of the center disk, in pixels.
pub const CENTER_SIZE: &str = "CENTER_SIZE";

/// Key for the width of each depth ring, in pixels.
pub const RING_WIDTH: &str = "RING_WIDTH";

/// A tree-ring view: the top node occupies a disk at the surface center and
/// each depth level adds one fixed-width ring, partitioned by angle.
///
/// A child's angular span is `parent_span * child_size / parent_size`,
/// normalized against its immediate parent at every level. This per-parent
/// normalization is intentional and load-bearing: under non-inclusive size
/// attributes it yields different wedges than a single root-relative
/// normalization would.
///
/// Angles are in degrees, counter-clockwise from the positive x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadialRenderer;

impl RadialRenderer {
    /// Creates a Radial renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<T: TreeSource + ?Sized> TreeRenderer<T> for RadialRenderer {
    fn name(&self) -> &'static str {
        "Radial"
    }

    fn prepare_configuration(&self, configuration: &mut Configuration) {
        configuration.add_if_absent(Property::scalar(CENTER_SIZE, "Center size", 50_i32));
        configuration.add_if_absent(Property::scalar(RING_WIDTH, "Ring width", 5_i32));
    }

    fn render_tree(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        target: &mut dyn DrawTarget,
    ) {
        let center_size = configuration.int(CENTER_SIZE);
        let ring_width = configuration.int(RING_WIDTH);
        let background = configuration.value::<Color>(BACKGROUND);
        let cx = f64::from(surface.width / 2);
        let cy = f64::from(surface.height / 2);

        // Rings, outermost pies first so inner levels paint over them.
        let top_size = ctx.size_of(ctx.top);
        if top_size != 0 {
            let mut sum = 0_i64;
            for child in ctx.tree.children(ctx.top) {
                let child_size = ctx.size_of(child);
                let start = 360.0 * sum as f64 / top_size as f64;
                let sweep = 360.0 * child_size as f64 / top_size as f64;
                render_node(
                    ctx,
                    configuration,
                    surface,
                    target,
                    child,
                    1,
                    start,
                    sweep,
                );
                sum += child_size;
            }
        }

        // Center disk for the top node on top of the innermost ring.
        let focused = ctx.is_focused(configuration, ctx.top);
        let fill = hsb_for(ctx, ctx.top, focused).to_color();
        let disk_radius = f64::from(center_size) / 2.0;
        target.fill_circle(cx, cy, disk_radius, fill);
        if ring_width > 2 {
            target.stroke_circle(cx, cy, disk_radius, background);
        }

        // A hollow center marks a zoomed-in view.
        if ctx.root != ctx.top {
            target.fill_circle(cx, cy, f64::from(center_size) / 4.0, background);
        }

        let clip = pixel_rect(0, 0, i64::from(surface.width), i64::from(surface.height));
        target.label(
            format!("{top_size}"),
            pixel_coord(i64::from(surface.width / 2)),
            pixel_coord(i64::from(surface.height / 2)),
            clip,
            Color::BLACK,
        );
    }

    fn find_node(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        x: i32,
        y: i32,
    ) -> Option<T::NodeId> {
        let dx = i64::from(x) - i64::from(surface.width / 2);
        let dy = i64::from(y) - i64::from(surface.height / 2);
        let radius = ((dx * dx + dy * dy) as f64).sqrt();
        let mut angle = (-dy as f64).atan2(dx as f64).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }

        let inner = f64::from(configuration.int(CENTER_SIZE) / 2);
        let ring_width = configuration.int(RING_WIDTH);
        if ring_width <= 0 {
            // Degenerate rings: only the center disk is addressable.
            return (radius < inner).then_some(ctx.top);
        }
        #[expect(clippy::cast_possible_truncation, reason = "levels are tiny")]
        let expected_level = ((radius - inner) / f64::from(ring_width)).floor() as i64 + 1;
        if expected_level <= 0 {
            return Some(ctx.top);
        }

        let top_size = ctx.size_of(ctx.top);
        if top_size == 0 {
            return None;
        }
        let mut sum = 0_i64;
        for child in ctx.tree.children(ctx.top) {
            let child_size = ctx.size_of(child);
            let start = 360.0 * sum as f64 / top_size as f64;
            let sweep = 360.0 * child_size as f64 / top_size as f64;
            if let Some(hit) = find_in_wedge(
                ctx,
                configuration,
                expected_level,
                angle,
                child,
                1,
                start,
                sweep,
            ) {
                return Some(hit);
            }
            sum += child_size;
        }
        None
    }
}

fn render_node<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    surface: Surface,
    target: &mut dyn DrawTarget,
    node: T::NodeId,
    level: i64,
    start: f64,
    sweep: f64,
) {
    let size = ctx.size_of(node);
    if size == 0 {
        return;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return;
    }

    let center_size = configuration.int(CENTER_SIZE);
    let ring_width = configuration.int(RING_WIDTH);
    let background = configuration.value::<Color>(BACKGROUND);
    let cx = f64::from(surface.width / 2);
    let cy = f64::from(surface.height / 2);
    let radius = (i64::from(center_size / 2) + level * i64::from(ring_width)) as f64;

    // Children first: their larger pies must lie under this node's.
    let mut sum = 0_i64;
    for child in ctx.tree.children(node) {
        let child_size = ctx.size_of(child);
        let child_start = start + sweep * sum as f64 / size as f64;
        let child_sweep = sweep * child_size as f64 / size as f64;
        render_node(
            ctx,
            configuration,
            surface,
            target,
            child,
            level + 1,
            child_start,
            child_sweep,
        );
        sum += child_size;
    }

    let focused = ctx.is_focused(configuration, node);
    let fill = hsb_for(ctx, node, focused).to_color();
    target.fill_wedge(cx, cy, radius, start, sweep, fill);
    if ring_width > 2 {
        target.stroke_arc(cx, cy, radius, start, sweep, background);
    }

    // Separator along the wedge's start angle; the inner part disappears
    // under the pies of shallower levels, which are painted later.
    let start_radians = start.to_radians();
    target.line(
        cx,
        cy,
        cx + radius * start_radians.cos(),
        cy - radius * start_radians.sin(),
        background,
    );
}

fn find_in_wedge<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    expected_level: i64,
    expected_angle: f64,
    node: T::NodeId,
    level: i64,
    start: f64,
    sweep: f64,
) -> Option<T::NodeId> {
    let size = ctx.size_of(node);
    if size == 0 {
        return None;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return None;
    }
    if level > expected_level {
        return None;
    }
    if expected_angle < start || expected_angle > start + sweep {
        return None;
    }
    if level == expected_level {
        return Some(node);
    }

    let mut sum = 0_i64;
    for child in ctx.tree.children(node) {
        let child_size = ctx.size_of(child);
        let child_start = start + sweep * sum as f64 / size as f64;
        let child_sweep = sweep * child_size as f64 / size as f64;
        if let Some(hit) = find_in_wedge(
            ctx,
            configuration,
            expected_level,
            expected_angle,
            child,
            level + 1,
            child_start,
            child_sweep,
        ) {
            return Some(hit);
        }
        sum += child_size;
    }
    None
}

// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Linear strategy: equal-height depth bands, stacked bottom-up.

use canopy_imaging::{DrawTarget, Surface};
use canopy_property::{Configuration, Property};
use canopy_tree::{TreeSource, subtree_height};
use peniko::Color;

use crate::{RenderContext, TreeRenderer, hsb_for, pixel_coord, pixel_rect, span_boundary};

/// Key for the gap between horizontal siblings, in pixels.
pub const HORIZONTAL_GAP: &str = "HORIZONTAL_GAP";

/// Key for the gap between depth bands, in pixels.
pub const VERTICAL_GAP: &str = "VERTICAL_GAP";

/// Key for whether node labels are drawn.
pub const SHOW_LABELS: &str = "SHOW_LABELS";

/// Unwound rings: one horizontal band per depth, starting at the surface
/// bottom, each band partitioned horizontally by the size attribute.
///
/// Band height is `surface_height / tree_height` where `tree_height` is the
/// longest path from the top node to a leaf, so the whole tree always fits
/// the surface vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinearRenderer;

impl LinearRenderer {
    /// Creates a Linear renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<T: TreeSource + ?Sized> TreeRenderer<T> for LinearRenderer {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn prepare_configuration(&self, configuration: &mut Configuration) {
        configuration.add_if_absent(Property::scalar(HORIZONTAL_GAP, "Horizontal gap", 1_i32));
        configuration.add_if_absent(Property::scalar(VERTICAL_GAP, "Vertical gap", 1_i32));
        configuration.add_if_absent(Property::scalar(SHOW_LABELS, "Show labels", true));
    }

    fn render_tree(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        target: &mut dyn DrawTarget,
    ) {
        let tree_height = subtree_height(ctx.tree, ctx.top);
        render_node(
            ctx,
            configuration,
            surface,
            target,
            ctx.top,
            0,
            i64::from(surface.width),
            tree_height,
            0,
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
        let tree_height = subtree_height(ctx.tree, ctx.top);
        find_node(
            ctx,
            configuration,
            surface,
            ctx.top,
            i64::from(x),
            i64::from(y),
            0,
            i64::from(surface.width),
            tree_height,
            0,
        )
    }
}

/// Returns the `[y_top, y_bottom)` band for a depth, counted from the
/// surface bottom upward.
fn band(surface_height: i64, tree_height: i64, depth: i64) -> (i64, i64) {
    let y_top = surface_height - 1 - (depth + 1) * surface_height / tree_height;
    let y_bottom = surface_height - 1 - depth * surface_height / tree_height;
    (y_top, y_bottom)
}

fn render_node<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    surface: Surface,
    target: &mut dyn DrawTarget,
    node: T::NodeId,
    x: i64,
    w: i64,
    tree_height: i64,
    depth: i64,
) {
    let gap = i64::from(configuration.int(HORIZONTAL_GAP));
    if w < 2 * gap || w < 1 {
        return;
    }
    let size = ctx.size_of(node);
    if size == 0 {
        return;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return;
    }

    let (y_top, y_bottom) = band(i64::from(surface.height), tree_height, depth);
    let h = y_bottom - y_top - i64::from(configuration.int(VERTICAL_GAP));

    let focused = ctx.is_focused(configuration, node);
    let fill = hsb_for(ctx, node, focused).to_color();
    let rect = pixel_rect(x + gap, y_top, w - gap, h);
    if !rect.is_empty() {
        target.fill_rect(rect, fill);
    }

    if configuration.boolean(SHOW_LABELS) {
        let text = ctx.label_of(node);
        if !text.is_empty() {
            let clip = pixel_rect(x, y_top, w, h);
            target.label(
                text,
                pixel_coord(x + w / 2),
                pixel_coord(y_top + h / 2),
                clip,
                Color::WHITE,
            );
        }
    }

    let mut sum = 0_i64;
    for child in ctx.tree.children(node) {
        let child_size = ctx.size_of(child);
        let lo = span_boundary(x, w, sum, size);
        let hi = span_boundary(x, w, sum + child_size, size);
        render_node(
            ctx,
            configuration,
            surface,
            target,
            child,
            lo,
            hi - lo,
            tree_height,
            depth + 1,
        );
        sum += child_size;
    }
}

fn find_node<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    surface: Surface,
    node: T::NodeId,
    mx: i64,
    my: i64,
    x: i64,
    w: i64,
    tree_height: i64,
    depth: i64,
) -> Option<T::NodeId> {
    let gap = i64::from(configuration.int(HORIZONTAL_GAP));
    if w < 2 * gap || w < 1 {
        return None;
    }
    let size = ctx.size_of(node);
    if size == 0 {
        return None;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return None;
    }

    // Deeper bands sit above this node's band, so children cannot shadow
    // their parent; checking them first matches the painting order.
    let mut sum = 0_i64;
    for child in ctx.tree.children(node) {
        let child_size = ctx.size_of(child);
        let lo = span_boundary(x, w, sum, size);
        let hi = span_boundary(x, w, sum + child_size, size);
        if let Some(hit) = find_node(
            ctx,
            configuration,
            surface,
            child,
            mx,
            my,
            lo,
            hi - lo,
            tree_height,
            depth + 1,
        ) {
            return Some(hit);
        }
        sum += child_size;
    }

    let (y_top, y_bottom) = band(i64::from(surface.height), tree_height, depth);
    (mx >= x && mx < x + w && my >= y_top && my < y_bottom).then_some(node)
}

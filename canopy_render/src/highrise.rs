// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Highrise strategy: Linear with attribute-driven band heights.

use canopy_imaging::{DrawTarget, Surface};
use canopy_property::{Configuration, Property};
use canopy_tree::{ChildCount, NumericAttribute, TreeSource};
use peniko::Color;

use crate::{
    Invalidation, MaxStatistic, RenderContext, TreeRenderer, hsb_for, pixel_coord, pixel_rect,
    span_boundary,
};

/// Key for the gap between horizontal siblings, in pixels.
pub const HORIZONTAL_GAP: &str = "HORIZONTAL_GAP";

/// Key for the gap between a node's band and its children's, in pixels.
pub const VERTICAL_GAP: &str = "VERTICAL_GAP";

/// Key for the fixed part of every band's height, in pixels.
pub const FIXED_HEIGHT: &str = "FIXED_HEIGHT";

/// Key for the height of the variable part at the attribute maximum, in
/// pixels.
pub const MAX_VARIABLE_HEIGHT: &str = "MAX_VARIABLE_HEIGHT";

/// Key for the [`LabelVisibility`] mode.
pub const LABEL_VISIBILITY: &str = "LABEL_VISIBILITY";

/// When Highrise node labels are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelVisibility {
    /// Never draw labels.
    HideAll,
    /// Draw labels only for nodes with a non-zero variable height.
    HideZero,
    /// Always draw labels.
    #[default]
    ShowAll,
}

/// Like [`crate::LinearRenderer`], but each node's band height is
/// `fixed + max_variable * height(node) / max_height_over_tree`, and bands
/// stack directly on their parent's instead of at fixed depths.
///
/// The tree-wide height-attribute maximum is cached in a [`MaxStatistic`];
/// call [`TreeRenderer::invalidate`] and [`TreeRenderer::recompute_statistics`]
/// after the tree or the height attribute changes. An uninitialized or
/// non-positive maximum renders every variable part at height 0.
#[derive(Clone, Debug, Default)]
pub struct HighriseRenderer {
    max_height: MaxStatistic,
}

impl HighriseRenderer {
    /// Creates a Highrise renderer with an uninitialized height statistic.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_height: MaxStatistic::new(),
        }
    }

    fn height_attr<'a, T: TreeSource + ?Sized>(
        ctx: &RenderContext<'a, T>,
    ) -> &'a dyn NumericAttribute<T> {
        ctx.height.unwrap_or(&ChildCount)
    }

    /// Band height above the fixed part for a node, in pixels.
    fn variable_height<T: TreeSource + ?Sized>(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        node: T::NodeId,
    ) -> i64 {
        match self.max_height.value() {
            Some(max) if max > 0 => {
                let value = Self::height_attr(ctx).evaluate(ctx.tree, node);
                i64::from(configuration.int(MAX_VARIABLE_HEIGHT)) * value / max
            }
            _ => 0,
        }
    }
}

impl<T: TreeSource + ?Sized> TreeRenderer<T> for HighriseRenderer {
    fn name(&self) -> &'static str {
        "Highrise"
    }

    fn prepare_configuration(&self, configuration: &mut Configuration) {
        configuration.add_if_absent(Property::scalar(HORIZONTAL_GAP, "Horizontal gap", 1_i32));
        configuration.add_if_absent(Property::scalar(VERTICAL_GAP, "Vertical gap", 1_i32));
        configuration.add_if_absent(Property::scalar(FIXED_HEIGHT, "Fixed height", 3_i32));
        configuration.add_if_absent(Property::scalar(
            MAX_VARIABLE_HEIGHT,
            "Max variable height",
            80_i32,
        ));
        configuration.add_if_absent(Property::scalar(
            LABEL_VISIBILITY,
            "Label visibility",
            LabelVisibility::ShowAll,
        ));
    }

    fn invalidate(&mut self, invalidation: Invalidation) {
        if invalidation.intersects(Invalidation::TREE | Invalidation::HEIGHT_ATTRIBUTE) {
            self.max_height.mark_dirty();
        }
    }

    fn recompute_statistics(&mut self, ctx: &RenderContext<'_, T>) {
        self.max_height
            .recompute(ctx.tree, ctx.root, Self::height_attr(ctx));
    }

    fn render_tree(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        target: &mut dyn DrawTarget,
    ) {
        render_node(
            self,
            ctx,
            configuration,
            surface,
            target,
            ctx.top,
            0,
            i64::from(surface.width),
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
        find_node(
            self,
            ctx,
            configuration,
            surface,
            ctx.top,
            i64::from(x),
            i64::from(y),
            0,
            i64::from(surface.width),
            0,
        )
    }
}

fn render_node<T: TreeSource + ?Sized>(
    renderer: &HighriseRenderer,
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    surface: Surface,
    target: &mut dyn DrawTarget,
    node: T::NodeId,
    x: i64,
    w: i64,
    base_height: i64,
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

    let fixed = i64::from(configuration.int(FIXED_HEIGHT));
    let variable = renderer.variable_height(ctx, configuration, node);
    let y_bottom = i64::from(surface.height) - 1 - base_height;
    let y_top = y_bottom - fixed - variable;
    let h = y_bottom - y_top - i64::from(configuration.int(VERTICAL_GAP));

    let focused = ctx.is_focused(configuration, node);
    let fill = hsb_for(ctx, node, focused).to_color();
    let rect = pixel_rect(x + gap, y_top, w - gap, h);
    if !rect.is_empty() {
        target.fill_rect(rect, fill);
    }

    let visibility = configuration.value::<LabelVisibility>(LABEL_VISIBILITY);
    if visibility == LabelVisibility::ShowAll
        || (visibility == LabelVisibility::HideZero && variable > 0)
    {
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
            renderer,
            ctx,
            configuration,
            surface,
            target,
            child,
            lo,
            hi - lo,
            base_height + fixed + variable,
        );
        sum += child_size;
    }
}

fn find_node<T: TreeSource + ?Sized>(
    renderer: &HighriseRenderer,
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    surface: Surface,
    node: T::NodeId,
    mx: i64,
    my: i64,
    x: i64,
    w: i64,
    base_height: i64,
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

    let fixed = i64::from(configuration.int(FIXED_HEIGHT));
    let variable = renderer.variable_height(ctx, configuration, node);
    let y_bottom = i64::from(surface.height) - 1 - base_height;
    let y_top = y_bottom - fixed - variable;

    let mut sum = 0_i64;
    for child in ctx.tree.children(node) {
        let child_size = ctx.size_of(child);
        let lo = span_boundary(x, w, sum, size);
        let hi = span_boundary(x, w, sum + child_size, size);
        if let Some(hit) = find_node(
            renderer,
            ctx,
            configuration,
            surface,
            child,
            mx,
            my,
            lo,
            hi - lo,
            base_height + fixed + variable,
        ) {
            return Some(hit);
        }
        sum += child_size;
    }

    (mx >= x && mx < x + w && my >= y_top && my < y_bottom).then_some(node)
}

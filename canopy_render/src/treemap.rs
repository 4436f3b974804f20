// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The TreeMap strategy: slice-and-dice rectangle partitioning.

use canopy_imaging::{DrawTarget, Surface};
use canopy_property::{Configuration, Property};
use canopy_tree::{TreeSource, path_length_to_root};
use peniko::Color;

use crate::{RenderContext, TreeRenderer, hsb_for, pixel_coord, pixel_rect, span_boundary};

/// Key for the inset between a node's rectangle and its children's, in
/// pixels.
pub const GAP: &str = "GAP";

/// A traditional slice-and-dice treemap.
///
/// Each node's rectangle is inset by the gap on all sides, then partitioned
/// among the children along one axis; the split axis alternates with depth.
/// Slice-and-dice often produces long thin rectangles, but its layout is
/// stable under data changes, which keeps visual comparison between trees
/// meaningful.
///
/// The orientation at the top node follows the parity of the path length
/// from the true root, so zooming in or out never flips the split axis of
/// an absolute depth level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeMapRenderer;

impl TreeMapRenderer {
    /// Creates a TreeMap renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl<T: TreeSource + ?Sized> TreeRenderer<T> for TreeMapRenderer {
    fn name(&self) -> &'static str {
        "Tree Map"
    }

    fn prepare_configuration(&self, configuration: &mut Configuration) {
        configuration.add_if_absent(Property::scalar(GAP, "Gap", 3_i32));
    }

    fn render_tree(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        target: &mut dyn DrawTarget,
    ) {
        let horizontal = path_length_to_root(ctx.tree, ctx.top) % 2 == 0;
        render_node(
            ctx,
            configuration,
            target,
            ctx.top,
            0,
            0,
            i64::from(surface.width),
            i64::from(surface.height),
            horizontal,
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
        let horizontal = path_length_to_root(ctx.tree, ctx.top) % 2 == 0;
        find_node(
            ctx,
            configuration,
            ctx.top,
            i64::from(x),
            i64::from(y),
            0,
            0,
            i64::from(surface.width),
            i64::from(surface.height),
            horizontal,
        )
    }
}

/// Child rectangles inside the gap-inset content region, in sequence order.
/// The split axis is horizontal (x) or vertical (y); boundaries come from
/// cumulative sums.
struct Slices<'a, T: TreeSource + ?Sized> {
    ctx: &'a RenderContext<'a, T>,
    children: canopy_tree::Children<'a, T>,
    size: i64,
    sum: i64,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    horizontal: bool,
}

impl<'a, T: TreeSource + ?Sized> Slices<'a, T> {
    fn new(
        ctx: &'a RenderContext<'a, T>,
        node: T::NodeId,
        size: i64,
        gap: i64,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
        horizontal: bool,
    ) -> Self {
        Self {
            ctx,
            children: ctx.tree.children(node),
            size,
            sum: 0,
            x: x + gap,
            y: y + gap,
            w: w - 2 * gap,
            h: h - 2 * gap,
            horizontal,
        }
    }
}

impl<T: TreeSource + ?Sized> Iterator for Slices<'_, T> {
    /// `(child, x, y, w, h)`
    type Item = (<T as TreeSource>::NodeId, i64, i64, i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next()?;
        let child_size = self.ctx.size_of(child);
        let item = if self.horizontal {
            let lo = span_boundary(self.x, self.w, self.sum, self.size);
            let hi = span_boundary(self.x, self.w, self.sum + child_size, self.size);
            (child, lo, self.y, hi - lo, self.h)
        } else {
            let lo = span_boundary(self.y, self.h, self.sum, self.size);
            let hi = span_boundary(self.y, self.h, self.sum + child_size, self.size);
            (child, self.x, lo, self.w, hi - lo)
        };
        self.sum += child_size;
        Some(item)
    }
}

fn render_node<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    target: &mut dyn DrawTarget,
    node: T::NodeId,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    horizontal: bool,
) {
    let gap = i64::from(configuration.int(GAP));
    if w < 2 * gap || h < 2 * gap || w < 1 || h < 1 {
        return;
    }
    let size = ctx.size_of(node);
    if size == 0 {
        return;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return;
    }

    let focused = ctx.is_focused(configuration, node);
    let fill = hsb_for(ctx, node, focused).to_color();
    target.fill_rect(pixel_rect(x, y, w, h), fill);

    if gap > 1 {
        // Borders make the nesting legible once the gap is wide enough:
        // one around the node, one around the area its children occupy.
        target.stroke_rect(pixel_rect(x, y, w, h), Color::BLACK);
        let total: i64 = ctx.tree.children(node).map(|c| ctx.size_of(c)).sum();
        if total > 0 {
            let area = if horizontal {
                pixel_rect(x + gap, y + gap, (w - 2 * gap) * total / size, h - 2 * gap)
            } else {
                pixel_rect(x + gap, y + gap, w - 2 * gap, (h - 2 * gap) * total / size)
            };
            target.stroke_rect(area, Color::BLACK);
        }
    }

    let text = ctx.label_of(node);
    if !text.is_empty() {
        target.label(
            text,
            pixel_coord(x + w / 2),
            pixel_coord(y + h / 2),
            pixel_rect(x, y, w, h),
            Color::WHITE,
        );
    }

    for (child, cx, cy, cw, ch) in Slices::new(ctx, node, size, gap, x, y, w, h, horizontal) {
        render_node(ctx, configuration, target, child, cx, cy, cw, ch, !horizontal);
    }
}

fn find_node<T: TreeSource + ?Sized>(
    ctx: &RenderContext<'_, T>,
    configuration: &Configuration,
    node: T::NodeId,
    mx: i64,
    my: i64,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
    horizontal: bool,
) -> Option<T::NodeId> {
    let gap = i64::from(configuration.int(GAP));
    if w < 2 * gap || h < 2 * gap || w < 1 || h < 1 {
        return None;
    }
    let size = ctx.size_of(node);
    if size == 0 {
        return None;
    }
    if size < ctx.cutoff_threshold(configuration) {
        return None;
    }

    // Children are painted over their parent, so they win the hit.
    for (child, cx, cy, cw, ch) in Slices::new(ctx, node, size, gap, x, y, w, h, horizontal) {
        if let Some(hit) = find_node(ctx, configuration, child, mx, my, cx, cy, cw, ch, !horizontal)
        {
            return Some(hit);
        }
    }

    (mx >= x && mx < x + w && my >= y && my < y + h).then_some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CUTOFF, prepare_view_configuration};
    use alloc::vec::Vec;
    use canopy_imaging::{DrawOp, PixelRect, Recording};
    use canopy_tree::{VecTree, numeric_fn, text_fn};

    type Payload = (&'static str, i64);
    type Tree = VecTree<Payload>;

    fn size_attr() -> impl canopy_tree::NumericAttribute<Tree> {
        numeric_fn("bytes", |t: &Tree, n| t.payload(n).1)
    }

    fn label_attr() -> impl canopy_tree::TextAttribute<Tree> {
        text_fn("name", |t: &Tree, n| Some(t.payload(n).0.into()))
    }

    fn config_with_gap(renderer: &TreeMapRenderer, gap: i32) -> Configuration {
        let mut config = Configuration::new();
        prepare_view_configuration(&mut config);
        TreeRenderer::<Tree>::prepare_configuration(renderer, &mut config);
        config.set_int(GAP, gap);
        config
    }

    fn fill_rects(recording: &Recording) -> Vec<PixelRect> {
        recording
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Two equal children under the root split horizontally at x = 50.
    #[test]
    fn equal_split_with_zero_gap() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 2));
        tree.push_child(root, ("a", 1));
        tree.push_child(root, ("b", 1));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 0);

        let mut recording = Recording::new();
        renderer.render_tree(&ctx, &config, Surface::new(100, 100), &mut recording);

        assert_eq!(
            fill_rects(&recording),
            [
                PixelRect::new(0, 0, 100, 100),
                PixelRect::new(0, 0, 50, 100),
                PixelRect::new(50, 0, 50, 100),
            ]
        );
    }

    #[test]
    fn orientation_alternates_with_depth() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 2));
        let a = tree.push_child(root, ("a", 2));
        tree.push_child(a, ("g1", 1));
        tree.push_child(a, ("g2", 1));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 0);

        let mut recording = Recording::new();
        renderer.render_tree(&ctx, &config, Surface::new(100, 100), &mut recording);

        // Root splits horizontally, so one level down the grandchildren
        // stack vertically.
        assert_eq!(
            fill_rects(&recording),
            [
                PixelRect::new(0, 0, 100, 100),
                PixelRect::new(0, 0, 100, 100),
                PixelRect::new(0, 0, 100, 50),
                PixelRect::new(0, 50, 100, 50),
            ]
        );
    }

    /// Zooming to a node at odd depth starts with a vertical split, so the
    /// absolute depth keeps its orientation.
    #[test]
    fn top_orientation_follows_absolute_depth() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 2));
        let a = tree.push_child(root, ("a", 2));
        tree.push_child(a, ("g1", 1));
        tree.push_child(a, ("g2", 1));

        let size = size_attr();
        let label = label_attr();
        let mut ctx = RenderContext::new(&tree, root, root, &size, &label);
        ctx.top = a;
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 0);

        let mut recording = Recording::new();
        renderer.render_tree(&ctx, &config, Surface::new(100, 100), &mut recording);

        assert_eq!(
            fill_rects(&recording),
            [
                PixelRect::new(0, 0, 100, 100),
                PixelRect::new(0, 0, 100, 50),
                PixelRect::new(0, 50, 100, 50),
            ]
        );
    }

    #[test]
    fn hit_test_respects_gap_and_nesting() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 2));
        let a = tree.push_child(root, ("a", 1));
        let b = tree.push_child(root, ("b", 1));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 2);
        let surface = Surface::new(100, 100);

        // Children live in the inset region (2, 2, 96, 96), split at x = 50.
        assert_eq!(renderer.find_node(&ctx, &config, surface, 1, 50), Some(root));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 10, 50), Some(a));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 49, 50), Some(a));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 50, 50), Some(b));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 97, 50), Some(b));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 98, 50), Some(root));
        assert_eq!(renderer.find_node(&ctx, &config, surface, 100, 50), None);
    }

    #[test]
    fn zero_size_draws_no_background() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 0));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 0);

        let mut recording = Recording::new();
        renderer.render_tree(&ctx, &config, Surface::new(100, 100), &mut recording);
        assert!(recording.is_empty());
        assert_eq!(renderer.find_node(&ctx, &config, Surface::new(100, 100), 50, 50), None);
    }

    #[test]
    fn wide_gaps_add_borders() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 2));
        tree.push_child(root, ("a", 2));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let config = config_with_gap(&renderer, 3);

        let mut recording = Recording::new();
        renderer.render_tree(&ctx, &config, Surface::new(100, 100), &mut recording);

        let borders: Vec<PixelRect> = recording
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // Node border plus children-area border, for the root and the
        // (childless) child only gets its node border.
        assert_eq!(
            borders,
            [
                PixelRect::new(0, 0, 100, 100),
                PixelRect::new(3, 3, 94, 94),
                PixelRect::new(3, 3, 94, 94),
            ]
        );
    }

    #[test]
    fn raising_the_cutoff_never_adds_nodes() {
        let mut tree = Tree::new();
        let root = tree.push_root(("main", 1000));
        let a = tree.push_child(root, ("a", 600));
        tree.push_child(root, ("b", 300));
        tree.push_child(root, ("c", 100));
        tree.push_child(a, ("a1", 50));

        let size = size_attr();
        let label = label_attr();
        let ctx = RenderContext::new(&tree, root, root, &size, &label);
        let renderer = TreeMapRenderer::new();
        let mut config = config_with_gap(&renderer, 0);

        let mut previous = usize::MAX;
        for cutoff in [1, 60, 150, 400, 1001] {
            config.set_int(CUTOFF, cutoff);
            let mut recording = Recording::new();
            renderer.render_tree(&ctx, &config, Surface::new(1000, 1000), &mut recording);
            let count = fill_rects(&recording).len();
            assert!(count <= previous, "rendered set grew when cutoff rose");
            previous = count;
        }
        assert_eq!(previous, 0);
    }
}

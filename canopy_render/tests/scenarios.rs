// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-strategy tests for `canopy_render`.
//!
//! Every strategy promises that rendering and hit-testing are inverses:
//! a pixel painted for a node maps back to that node. These tests check
//! the promise without knowing any strategy's geometry, by giving every
//! node a distinct fill color and probing painted pixels.

use canopy_imaging::{DrawOp, PixelRect, Recording, Surface};
use canopy_property::Configuration;
use canopy_render::{
    HighriseRenderer, Invalidation, LinearRenderer, RadialRenderer, RenderContext, TreeMapRenderer,
    TreeRenderer, hsb_for, linear, prepare_view_configuration, radial, treemap,
};
use canopy_tree::{
    NodeId, NumericAttribute, TextAttribute, TreeSource, VecTree, numeric_fn, text_fn,
};
use peniko::Color;

/// (label, size)
type Payload = (&'static str, i64);
type Tree = VecTree<Payload>;

/// A small call-tree-shaped sample with uneven sizes at every level.
fn profile_tree() -> Tree {
    let mut tree = Tree::new();
    let a = tree.push_root(("a", 1000));
    let b = tree.push_child(a, ("b", 400));
    tree.push_child(b, ("c", 150));
    tree.push_child(b, ("d", 250));
    tree.push_child(a, ("e", 350));
    let f = tree.push_child(a, ("f", 100));
    tree.push_child(f, ("g", 60));
    tree
}

fn size_attr() -> impl NumericAttribute<Tree> {
    numeric_fn("samples", |t: &Tree, n| t.payload(n).1)
}

fn label_attr() -> impl TextAttribute<Tree> {
    text_fn("name", |t: &Tree, n| Some(t.payload(n).0.into()))
}

/// All strategies, freshly constructed with their statistics up to date.
fn strategies(ctx: &RenderContext<'_, Tree>) -> Vec<Box<dyn TreeRenderer<Tree>>> {
    let mut all: Vec<Box<dyn TreeRenderer<Tree>>> = vec![
        Box::new(LinearRenderer::new()),
        Box::new(HighriseRenderer::new()),
        Box::new(RadialRenderer::new()),
        Box::new(TreeMapRenderer::new()),
    ];
    for strategy in &mut all {
        strategy.invalidate(Invalidation::all());
        strategy.recompute_statistics(ctx);
    }
    all
}

fn configured(strategy: &dyn TreeRenderer<Tree>) -> Configuration {
    let mut config = Configuration::new();
    prepare_view_configuration(&mut config);
    strategy.prepare_configuration(&mut config);
    config
}

/// Maps every node's fill color back to the node.
///
/// The sample labels hash to distinct hues, so the mapping is injective;
/// the assertion guards the sample against collisions.
fn colors_by_node(ctx: &RenderContext<'_, Tree>) -> Vec<(Color, NodeId)> {
    let mut out = Vec::new();
    let mut pending = vec![ctx.root];
    while let Some(node) = pending.pop() {
        let color = hsb_for(ctx, node, false).to_color();
        assert!(
            out.iter().all(|&(c, _)| c != color),
            "sample colors must be distinct"
        );
        out.push((color, node));
        pending.extend(ctx.tree.children(node));
    }
    out
}

fn node_for_color(map: &[(Color, NodeId)], color: Color) -> NodeId {
    map.iter()
        .find(|&&(c, _)| c == color)
        .map(|&(_, n)| n)
        .unwrap_or_else(|| panic!("no node painted {color:?}"))
}

/// The single filled rectangle painted in this color.
fn fill_rect_for(recording: &Recording, color: Color) -> PixelRect {
    let mut rects = recording.ops().iter().filter_map(|op| match op {
        DrawOp::FillRect { rect, color: c, .. } if *c == color => Some(*rect),
        _ => None,
    });
    let rect = rects
        .next()
        .unwrap_or_else(|| panic!("no rectangle painted {color:?}"));
    assert_eq!(rects.next(), None, "{color:?} painted more than once");
    rect
}

fn disjoint(a: PixelRect, b: PixelRect) -> bool {
    a.x + a.width <= b.x || b.x + b.width <= a.x || a.y + a.height <= b.y || b.y + b.height <= a.y
}

/// For the rectangle-based strategies: sample a pixel grid, find the
/// topmost filled rectangle covering each point, and check that the
/// hit-test names the node that painted it.
#[test]
fn painted_pixels_hit_test_to_their_node() {
    let tree = profile_tree();
    let root = tree.root().unwrap();
    let size = size_attr();
    let label = label_attr();
    let hue = label_attr();
    let mut ctx = RenderContext::new(&tree, root, root, &size, &label);
    ctx.hue = Some(&hue);

    let map = colors_by_node(&ctx);
    let surface = Surface::new(300, 200);

    for strategy in strategies(&ctx) {
        let config = configured(strategy.as_ref());
        let mut recording = Recording::new();
        strategy.render_tree(&ctx, &config, surface, &mut recording);

        for y in (0..200).step_by(7) {
            for x in (0..300).step_by(7) {
                let top_fill = recording
                    .ops()
                    .iter()
                    .filter_map(|op| match op {
                        DrawOp::FillRect { rect, color } if rect.contains(x, y) => Some(*color),
                        _ => None,
                    })
                    .last();
                let Some(color) = top_fill else {
                    continue;
                };
                let expected = node_for_color(&map, color);
                assert_eq!(
                    strategy.find_node(&ctx, &config, surface, x, y),
                    Some(expected),
                    "{} at ({x}, {y})",
                    strategy.name()
                );
            }
        }
    }
}

/// For the Radial strategy: probe the midpoint of every painted wedge
/// (mid-angle, mid-ring) and check the hit-test agrees with the paint.
#[test]
fn wedge_midpoints_hit_test_to_their_node() {
    let tree = profile_tree();
    let root = tree.root().unwrap();
    let size = size_attr();
    let label = label_attr();
    let hue = label_attr();
    let mut ctx = RenderContext::new(&tree, root, root, &size, &label);
    ctx.hue = Some(&hue);

    let map = colors_by_node(&ctx);
    let strategy = RadialRenderer::new();
    let config = configured(&strategy);
    let ring_width = f64::from(config.int(radial::RING_WIDTH));
    let surface = Surface::new(400, 400);

    let mut recording = Recording::new();
    strategy.render_tree(&ctx, &config, surface, &mut recording);

    let mut probed = 0;
    for op in recording.ops() {
        let DrawOp::FillWedge {
            cx,
            cy,
            radius,
            start_angle,
            sweep,
            color,
        } = *op
        else {
            continue;
        };
        let expected = node_for_color(&map, color);
        let theta = (start_angle + sweep / 2.0).to_radians();
        let r = radius - ring_width / 2.0;
        #[expect(clippy::cast_possible_truncation, reason = "probe points lie on the surface")]
        let px = (cx + r * theta.cos()).round() as i32;
        #[expect(clippy::cast_possible_truncation, reason = "probe points lie on the surface")]
        let py = (cy - r * theta.sin()).round() as i32;
        assert_eq!(
            strategy.find_node(&ctx, &config, surface, px, py),
            Some(expected),
            "wedge midpoint ({px}, {py})"
        );
        probed += 1;
    }
    // The sample has six non-top nodes, all above the default cutoff.
    assert_eq!(probed, 6);
}

/// Raising the cutoff only ever removes drawing operations.
#[test]
fn raising_the_cutoff_never_adds_work() {
    let tree = profile_tree();
    let root = tree.root().unwrap();
    let size = size_attr();
    let label = label_attr();
    let ctx = RenderContext::new(&tree, root, root, &size, &label);
    let surface = Surface::new(400, 400);

    for strategy in strategies(&ctx) {
        let mut config = configured(strategy.as_ref());
        let mut previous = usize::MAX;
        for cutoff in [1, 70, 120, 300, 1001] {
            config.set_int(canopy_render::CUTOFF, cutoff);
            let mut recording = Recording::new();
            strategy.render_tree(&ctx, &config, surface, &mut recording);
            assert!(
                recording.len() <= previous,
                "{} grew at cutoff {cutoff}",
                strategy.name()
            );
            previous = recording.len();
        }
    }
}

/// Four children with intentionally ragged sizes, so integer boundary
/// rounding is exercised at every split.
fn ragged_tree() -> Tree {
    let mut tree = Tree::new();
    let root = tree.push_root(("sum", 997));
    tree.push_child(root, ("p", 313));
    tree.push_child(root, ("q", 311));
    tree.push_child(root, ("r", 211));
    tree.push_child(root, ("s", 162));
    tree
}

/// TreeMap children partition the parent's gap-inset content region:
/// pairwise disjoint, contained, and tiling the split axis without holes.
#[test]
fn treemap_children_tile_the_parent_content_region() {
    let tree = ragged_tree();
    let root = tree.root().unwrap();
    let size = size_attr();
    let label = label_attr();
    let hue = label_attr();
    let mut ctx = RenderContext::new(&tree, root, root, &size, &label);
    ctx.hue = Some(&hue);

    // Guards the sample against hue collisions between siblings.
    colors_by_node(&ctx);
    let strategy = TreeMapRenderer::new();
    let config = configured(&strategy);
    let gap = config.int(treemap::GAP);
    let surface = Surface::new(101, 73);

    let mut recording = Recording::new();
    strategy.render_tree(&ctx, &config, surface, &mut recording);

    let parent = fill_rect_for(&recording, hsb_for(&ctx, root, false).to_color());
    assert_eq!(parent, PixelRect::new(0, 0, 101, 73));
    let mut slices: Vec<PixelRect> = (0..tree.child_count(root))
        .map(|i| fill_rect_for(&recording, hsb_for(&ctx, tree.child(root, i), false).to_color()))
        .collect();

    for (i, a) in slices.iter().enumerate() {
        // Contained in the content region, gap pixels in from every edge.
        assert!(a.x >= parent.x + gap && a.x + a.width <= parent.x + parent.width - gap);
        assert!(a.y >= parent.y + gap && a.y + a.height <= parent.y + parent.height - gap);
        for b in &slices[i + 1..] {
            assert!(disjoint(*a, *b), "overlapping slices {a:?} and {b:?}");
        }
    }

    // The split is horizontal at the root, so the slices share the full
    // content height and their widths tile the content width exactly.
    slices.sort_by_key(|r| r.x);
    let mut edge = parent.x + gap;
    for slice in &slices {
        assert_eq!(slice.x, edge, "hole before {slice:?}");
        assert_eq!(slice.y, parent.y + gap);
        assert_eq!(slice.height, parent.height - 2 * gap);
        edge = slice.x + slice.width;
    }
    assert_eq!(edge, parent.x + parent.width - gap);
}

/// Linear sibling bands never overlap and stay inside the parent's span.
#[test]
fn linear_siblings_are_disjoint_within_the_parent_span() {
    let tree = ragged_tree();
    let root = tree.root().unwrap();
    let size = size_attr();
    let label = label_attr();
    let hue = label_attr();
    let mut ctx = RenderContext::new(&tree, root, root, &size, &label);
    ctx.hue = Some(&hue);

    colors_by_node(&ctx);
    let strategy = LinearRenderer::new();
    let mut config = configured(&strategy);
    config.set_boolean(linear::SHOW_LABELS, false);
    let surface = Surface::new(101, 73);

    let mut recording = Recording::new();
    strategy.render_tree(&ctx, &config, surface, &mut recording);

    let parent = fill_rect_for(&recording, hsb_for(&ctx, root, false).to_color());
    let bands: Vec<PixelRect> = (0..tree.child_count(root))
        .map(|i| fill_rect_for(&recording, hsb_for(&ctx, tree.child(root, i), false).to_color()))
        .collect();

    for (i, a) in bands.iter().enumerate() {
        // Children sit in the band above the parent, within its x span.
        assert!(a.x >= parent.x && a.x + a.width <= parent.x + parent.width);
        assert!(a.y + a.height <= parent.y, "band {a:?} reaches into {parent:?}");
        for b in &bands[i + 1..] {
            assert!(disjoint(*a, *b), "overlapping bands {a:?} and {b:?}");
        }
    }
}

/// Zooming to a subtree paints only that subtree's nodes, in every strategy.
#[test]
fn zoomed_view_paints_only_the_subtree() {
    let tree = profile_tree();
    let root = tree.root().unwrap();
    let b = tree.child(root, 0);
    let size = size_attr();
    let label = label_attr();
    let hue = label_attr();
    let mut ctx = RenderContext::new(&tree, root, b, &size, &label);
    ctx.hue = Some(&hue);

    let subtree: Vec<Color> = [b, tree.child(b, 0), tree.child(b, 1)]
        .iter()
        .map(|&n| hsb_for(&ctx, n, false).to_color())
        .collect();
    let surface = Surface::new(300, 200);

    for strategy in strategies(&ctx) {
        let config = configured(strategy.as_ref());
        let mut recording = Recording::new();
        strategy.render_tree(&ctx, &config, surface, &mut recording);
        for op in recording.ops() {
            let node_fill = match op {
                DrawOp::FillRect { color, .. } | DrawOp::FillWedge { color, .. } => Some(*color),
                _ => None,
            };
            if let Some(color) = node_fill {
                assert!(
                    subtree.contains(&color),
                    "{} painted a node outside the b subtree",
                    strategy.name()
                );
            }
        }
    }
}

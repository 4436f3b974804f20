// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Render: space-filling tree layouts with inverse hit-testing.
//!
//! This crate draws a weighted, attributed tree (for example a profiling
//! call tree) onto a 2D surface using one of four interchangeable layout
//! strategies, and maps pointer coordinates back to the node occupying that
//! pixel. Every strategy is a pair of mutually-inverse geometric functions
//! over a recursively partitioned area: [`TreeRenderer::render_tree`] emits
//! drawing primitives, and [`TreeRenderer::find_node`] walks the same
//! partition with the same arithmetic, so a pixel painted for a node is
//! guaranteed to hit-test back to that node.
//!
//! # Strategies
//!
//! - [`LinearRenderer`]: horizontal bands of equal height stacked bottom-up,
//!   one band per depth, partitioned horizontally by a size attribute.
//! - [`HighriseRenderer`]: like Linear, but each node's band height varies
//!   with a secondary attribute, normalized by the attribute's maximum over
//!   the whole tree.
//! - [`RadialRenderer`]: a center disk for the top node plus one fixed-width
//!   ring per depth, partitioned by angle.
//! - [`TreeMapRenderer`]: slice-and-dice treemap, alternating split
//!   orientation with depth.
//!
//! # Shared rules
//!
//! All four strategies apply the same rules, identically in render and
//! hit-test:
//!
//! - **Cutoff pruning**: a node is visible only if
//!   `size(node) >= cutoff * size(root) / 1000`. Pruned subtrees leave their
//!   allotted space empty; space is not redistributed to siblings.
//! - **Zero-size guard**: a node with size 0 stops rendering and hit-testing
//!   of its subtree before anything is drawn.
//! - **Degenerate-region guard**: recursion stops when the allotted extent
//!   is smaller than twice the configured gap, or smaller than one pixel.
//! - **Proportional partition**: child boundaries come from cumulative size
//!   sums, `lo = floor(extent * sum / size)`, so rounding never accumulates
//!   drift between siblings.
//!
//! # Statistics and invalidation
//!
//! Some strategies cache a maximum attribute value for normalization
//! ([`MaxStatistic`]). The cache is invalidated explicitly: the host calls
//! [`TreeRenderer::invalidate`] with the [`Invalidation`] flags describing
//! what changed, then [`TreeRenderer::recompute_statistics`] before the next
//! render or hit-test. A stale maximum silently produces wrong scaling, not
//! a crash, so this sequencing is a correctness requirement.
//!
//! # Quick start
//!
//! ```
//! use canopy_imaging::{Recording, Surface};
//! use canopy_property::Configuration;
//! use canopy_render::{
//!     LinearRenderer, RenderContext, TreeRenderer, prepare_view_configuration,
//! };
//! use canopy_tree::{VecTree, numeric_fn, text_fn};
//!
//! type Tree = VecTree<(&'static str, i64)>;
//!
//! let mut tree = Tree::new();
//! let root = tree.push_root(("main", 4_i64));
//! tree.push_child(root, ("parse", 3));
//! tree.push_child(root, ("emit", 1));
//!
//! let size = numeric_fn("calls", |t: &Tree, n| t.payload(n).1);
//! let label = text_fn("name", |t: &Tree, n| Some(t.payload(n).0.into()));
//!
//! let renderer = LinearRenderer::new();
//! let mut config = Configuration::new();
//! prepare_view_configuration(&mut config);
//! TreeRenderer::<Tree>::prepare_configuration(&renderer, &mut config);
//!
//! let ctx = RenderContext::new(&tree, root, root, &size, &label);
//! let surface = Surface::new(100, 40);
//! let mut recording = Recording::new();
//! renderer.render_tree(&ctx, &config, surface, &mut recording);
//!
//! // y = 25 falls in the bottom band, which belongs to the root.
//! assert_eq!(renderer.find_node(&ctx, &config, surface, 30, 25), Some(root));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature
//! instead of `std` on targets without a float runtime.

#![no_std]

extern crate alloc;

mod color;
mod context;
pub mod highrise;
pub mod linear;
pub mod radial;
mod stats;
pub mod treemap;

pub use color::{category_hash, hsb_for};
pub use context::RenderContext;
pub use highrise::{HighriseRenderer, LabelVisibility};
pub use linear::LinearRenderer;
pub use radial::RadialRenderer;
pub use stats::MaxStatistic;
pub use treemap::TreeMapRenderer;

use canopy_imaging::{DrawTarget, Surface};
use canopy_property::{Configuration, Property};
use canopy_tree::TreeSource;
use peniko::Color;

/// Key for the shared focus mode: when `true`, all nodes sharing the current
/// node's label count as focused, not just the current node itself.
pub const FOCUS_SAME: &str = "FOCUS_SAME";

/// Key for the shared cutoff, in parts per thousand of the root's size.
pub const CUTOFF: &str = "CUTOFF";

/// Key for the shared background color.
pub const BACKGROUND: &str = "BACKGROUND";

/// Registers the view-level properties shared by all strategies.
///
/// Existing values are kept; only absent keys get their defaults
/// (focus-same off, cutoff 1‰, white background).
pub fn prepare_view_configuration(configuration: &mut Configuration) {
    configuration.add_if_absent(Property::scalar(FOCUS_SAME, "Focus", false));
    configuration.add_if_absent(Property::scalar(CUTOFF, "Cutoff", 1_i32));
    configuration.add_if_absent(Property::scalar(BACKGROUND, "Background", Color::WHITE));
}

bitflags::bitflags! {
    /// What changed since the last render pass.
    ///
    /// Passed to [`TreeRenderer::invalidate`] so a strategy can mark its
    /// cached statistics dirty. Flags that a strategy caches nothing for are
    /// ignored.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Invalidation: u8 {
        /// The tree structure or node data changed.
        const TREE = 1 << 0;
        /// The top node (zoom level) changed.
        const TOP_NODE = 1 << 1;
        /// The size-driving attribute changed.
        const SIZE_ATTRIBUTE = 1 << 2;
        /// The height-driving attribute changed (Highrise).
        const HEIGHT_ATTRIBUTE = 1 << 3;
        /// The saturation-driving attribute changed.
        const SATURATION_ATTRIBUTE = 1 << 4;
        /// A configuration property changed.
        const CONFIG = 1 << 5;
    }
}

/// A space-filling tree layout: rendering plus the inverse hit-test.
///
/// Implementations are stateless apart from cached statistics; the full
/// snapshot (tree, attributes, configuration, surface) is passed into every
/// call and never retained.
pub trait TreeRenderer<T: TreeSource + ?Sized> {
    /// Returns the human-readable strategy name.
    fn name(&self) -> &'static str;

    /// Registers this strategy's configuration keys with their defaults.
    ///
    /// Existing values are kept, so embedder-supplied settings survive.
    fn prepare_configuration(&self, configuration: &mut Configuration);

    /// Marks cached statistics dirty according to what changed.
    fn invalidate(&mut self, _invalidation: Invalidation) {}

    /// Refreshes cached statistics if they are dirty. Idempotent.
    ///
    /// Must be called before [`Self::render_tree`] or [`Self::find_node`]
    /// whenever the tree or a driving attribute changed.
    fn recompute_statistics(&mut self, _ctx: &RenderContext<'_, T>) {}

    /// Draws the top node and its descendants into the full surface region.
    fn render_tree(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        target: &mut dyn DrawTarget,
    );

    /// Returns the node whose rendered region contains `(x, y)`.
    ///
    /// Returns `None` for gap pixels, dead space left by pruned subtrees,
    /// and points outside every rendered node.
    fn find_node(
        &self,
        ctx: &RenderContext<'_, T>,
        configuration: &Configuration,
        surface: Surface,
        x: i32,
        y: i32,
    ) -> Option<T::NodeId>;
}

/// Returns `origin + floor(extent * sum / size)`.
///
/// Both render and hit-test derive every child boundary from cumulative
/// sums through this single function, which is what makes them inverses.
pub(crate) fn span_boundary(origin: i64, extent: i64, sum: i64, size: i64) -> i64 {
    origin + extent * sum / size
}

/// Builds a [`canopy_imaging::PixelRect`] from `i64` layout coordinates.
#[expect(
    clippy::cast_possible_truncation,
    reason = "layout coordinates are bounded by the surface size"
)]
pub(crate) fn pixel_rect(x: i64, y: i64, width: i64, height: i64) -> canopy_imaging::PixelRect {
    canopy_imaging::PixelRect::new(x as i32, y as i32, width as i32, height as i32)
}

/// Narrows an `i64` layout coordinate to an `i32` pixel coordinate.
#[expect(
    clippy::cast_possible_truncation,
    reason = "layout coordinates are bounded by the surface size"
)]
pub(crate) fn pixel_coord(v: i64) -> i32 {
    v as i32
}
